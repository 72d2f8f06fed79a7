//! Roster service

use std::collections::{BTreeSet, HashMap, HashSet};

use sqlx::SqlitePool;

use crate::{
    constants::MAX_IMPORT_BATCH,
    db::repositories::{EventRepository, SettingsRepository, StudentRepository},
    error::{AppError, AppResult},
    handlers::roster::{
        request::{
            CreateEventRequest, CreateHousesRequest, ImportStudentsRequest, RegistrationRequest,
        },
        response::{
            CategoriesResponse, EventsResponse, HousesResponse, ImportStudentsResponse,
            StudentResponse,
        },
    },
    models::{Event, Student},
    utils::{validate_admission_number, validate_name},
};

/// Roster service for houses, events, students and registrations
pub struct RosterService;

impl RosterService {
    /// List houses
    pub async fn list_houses(pool: &SqlitePool) -> AppResult<HousesResponse> {
        let houses = EventRepository::list_houses(pool).await?;
        Ok(HousesResponse {
            houses: houses.into_iter().map(|h| h.name).collect(),
        })
    }

    /// Add houses; existing names are left as they are
    pub async fn create_houses(
        pool: &SqlitePool,
        payload: CreateHousesRequest,
    ) -> AppResult<HousesResponse> {
        let names = payload
            .names
            .iter()
            .map(|name| Self::name(name))
            .collect::<AppResult<Vec<_>>>()?;

        let created = EventRepository::create_houses(pool, &names).await?;
        tracing::info!(created, "Houses added");

        Self::list_houses(pool).await
    }

    /// List events
    pub async fn list_events(pool: &SqlitePool) -> AppResult<EventsResponse> {
        Ok(EventsResponse {
            events: EventRepository::list_events(pool).await?,
        })
    }

    /// Create an event
    pub async fn create_event(pool: &SqlitePool, payload: CreateEventRequest) -> AppResult<Event> {
        let name = Self::name(&payload.name)?;

        let event = EventRepository::create_event(pool, &name, payload.is_group)
            .await
            .map_err(|err| match err {
                AppError::AlreadyExists(_) => {
                    AppError::AlreadyExists(format!("Event already exists: {}", name))
                }
                other => other,
            })?;

        tracing::info!(event = %event.name, group = event.is_group, "Event created");
        Ok(event)
    }

    /// Insert or update a batch of students atomically.
    ///
    /// Categories come from the class allotment. An omitted or empty house
    /// keeps the stored house of an existing student.
    pub async fn import_students(
        pool: &SqlitePool,
        payload: ImportStudentsRequest,
    ) -> AppResult<ImportStudentsResponse> {
        if payload.students.len() > MAX_IMPORT_BATCH {
            return Err(AppError::InvalidInput(format!(
                "At most {} students can be imported at once",
                MAX_IMPORT_BATCH
            )));
        }

        let houses: HashSet<String> = EventRepository::list_houses(pool)
            .await?
            .into_iter()
            .map(|h| h.name)
            .collect();
        let categories: HashMap<String, String> = SettingsRepository::list_class_categories(pool)
            .await?
            .into_iter()
            .map(|c| (c.class.to_lowercase(), c.category))
            .collect();

        let mut seen = HashSet::new();
        let mut students = Vec::with_capacity(payload.students.len());
        for record in payload.students {
            let admission_number = validate_admission_number(&record.admission_number)
                .map_err(|e| AppError::Validation(e.to_string()))?;
            if !seen.insert(admission_number.clone()) {
                return Err(AppError::Validation(format!(
                    "Duplicate admission number in import: {}",
                    admission_number
                )));
            }

            let house = match record.house.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(house) if houses.contains(house) => Some(house.to_string()),
                Some(house) => {
                    return Err(AppError::Validation(format!(
                        "Unknown house for {}: {}",
                        admission_number, house
                    )));
                }
            };

            let class = Self::name(&record.class)?;
            let category = categories
                .get(&class.to_lowercase())
                .cloned()
                .ok_or_else(|| {
                    AppError::Validation(format!(
                        "No category is allotted to class {} ({})",
                        class, admission_number
                    ))
                })?;

            students.push(Student {
                admission_number,
                name: Self::name(&record.name)?,
                class,
                division: Self::name(&record.division)?,
                house,
                category,
            });
        }

        StudentRepository::upsert_many(pool, &students).await?;
        tracing::info!(count = students.len(), "Students imported");

        Ok(ImportStudentsResponse {
            imported: students.len(),
        })
    }

    /// Get a student and their registered events
    pub async fn get_student(pool: &SqlitePool, admission_number: &str) -> AppResult<StudentResponse> {
        let student = Self::find_student(pool, admission_number).await?;
        let events = StudentRepository::registered_events(pool, &student.admission_number).await?;

        Ok(StudentResponse {
            class_division: student.class_division(),
            student,
            events,
        })
    }

    /// Replace a student's house and event registrations.
    ///
    /// Events left out of the new set are un-registered, discarding their
    /// marks. Newly added events start unjudged with a total of zero.
    pub async fn register_events(
        pool: &SqlitePool,
        admission_number: &str,
        payload: RegistrationRequest,
    ) -> AppResult<StudentResponse> {
        let student = Self::find_student(pool, admission_number).await?;

        // An omitted house keeps the current one; an empty string clears it
        let house = match payload.house.as_deref().map(str::trim) {
            None => student.house.clone(),
            Some("") => None,
            Some(house) => Some(
                EventRepository::find_house(pool, house)
                    .await?
                    .ok_or_else(|| AppError::Validation(format!("Unknown house: {}", house)))?
                    .name,
            ),
        };

        let requested: BTreeSet<String> = payload
            .events
            .iter()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();

        let max_events = SettingsRepository::get_parameters(pool)
            .await?
            .max_events_per_student()?;
        if requested.len() > max_events as usize {
            return Err(AppError::Validation(format!(
                "A student may register for at most {} events ({} requested)",
                max_events,
                requested.len()
            )));
        }

        for name in &requested {
            let event = EventRepository::find_event(pool, name)
                .await?
                .ok_or_else(|| AppError::Validation(format!("Unknown event: {}", name)))?;
            if event.is_group && house.is_none() {
                return Err(AppError::Validation(format!(
                    "Group event {} requires the student to belong to a house",
                    name
                )));
            }
        }

        StudentRepository::replace_registration(
            pool,
            &student.admission_number,
            house.as_deref(),
            &requested,
        )
        .await?;

        tracing::info!(
            admission_number = %student.admission_number,
            events = requested.len(),
            "Registration updated"
        );

        Self::get_student(pool, &student.admission_number).await
    }

    /// Categories present in the roster
    pub async fn list_categories(pool: &SqlitePool) -> AppResult<CategoriesResponse> {
        Ok(CategoriesResponse {
            categories: StudentRepository::list_categories(pool).await?,
        })
    }

    /// Events with registered participants in `category`
    pub async fn list_events_for_category(
        pool: &SqlitePool,
        category: &str,
        group: Option<bool>,
    ) -> AppResult<EventsResponse> {
        Ok(EventsResponse {
            events: EventRepository::events_for_category(pool, category, group).await?,
        })
    }

    async fn find_student(pool: &SqlitePool, admission_number: &str) -> AppResult<Student> {
        StudentRepository::find_by_admission_number(pool, admission_number.trim())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Student not found: {}", admission_number))
            })
    }

    fn name(value: &str) -> AppResult<String> {
        validate_name(value).map_err(|e| AppError::Validation(format!("{}: {:?}", e, value)))
    }
}
