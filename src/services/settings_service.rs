//! Settings service

use std::collections::HashSet;

use sqlx::SqlitePool;

use crate::{
    db::repositories::SettingsRepository,
    error::{AppError, AppResult},
    handlers::settings::{
        request::{ReplaceClassCategoriesRequest, ReplaceGradeTableRequest, UpdateParametersRequest},
        response::{ClassCategoriesResponse, GradeTableResponse, ParametersResponse},
    },
    models::{ClassCategory, ParametersRow},
    scoring::{GradeTable, GradeThreshold, RankingParameters, ScoringError},
    utils::{sanitize_string, validate_name},
};

/// Settings service for ranking parameters, the grade table and class allotment
pub struct SettingsService;

impl SettingsService {
    /// Get the stored parameters
    pub async fn get_parameters(pool: &SqlitePool) -> AppResult<ParametersResponse> {
        let row = SettingsRepository::get_parameters(pool).await?;
        Self::to_parameters_response(&row)
    }

    /// Replace the stored parameters.
    ///
    /// The existing grade table must stay reachable under the new maximum.
    pub async fn update_parameters(
        pool: &SqlitePool,
        payload: UpdateParametersRequest,
    ) -> AppResult<ParametersResponse> {
        let params = RankingParameters {
            number_of_judges: payload.number_of_judges,
            max_marks_per_judge: payload.max_marks_per_judge,
            min_marks_for_prize: payload.min_marks_for_prize,
            consolation_allowed: payload.consolation_allowed,
        };
        params.validate().map_err(Self::rejected)?;

        let grades = Self::stored_thresholds(pool).await?;
        if !grades.is_empty() {
            GradeTable::new(grades)?
                .validate_against(&params)
                .map_err(Self::rejected)?;
        }

        let row = ParametersRow {
            number_of_judges: i64::from(params.number_of_judges),
            max_marks_per_judge: i64::from(params.max_marks_per_judge),
            min_marks_for_prize: i64::from(params.min_marks_for_prize),
            consolation_allowed: params.consolation_allowed,
            max_events_per_student: i64::from(payload.max_events_per_student),
        };
        SettingsRepository::upsert_parameters(pool, &row).await?;

        tracing::info!(
            judges = params.number_of_judges,
            max_marks = params.max_marks_per_judge,
            min_for_prize = params.min_marks_for_prize,
            consolation = params.consolation_allowed,
            "Ranking parameters updated"
        );

        Self::to_parameters_response(&row)
    }

    /// Get the stored grade table (possibly empty)
    pub async fn get_grade_table(pool: &SqlitePool) -> AppResult<GradeTableResponse> {
        Ok(GradeTableResponse {
            thresholds: Self::stored_thresholds(pool).await?,
        })
    }

    /// Replace the whole grade table
    pub async fn replace_grade_table(
        pool: &SqlitePool,
        payload: ReplaceGradeTableRequest,
    ) -> AppResult<GradeTableResponse> {
        let thresholds = payload
            .thresholds
            .into_iter()
            .map(|t| GradeThreshold::new(sanitize_string(&t.grade), t.min_marks))
            .collect();
        let table = GradeTable::new(thresholds).map_err(Self::rejected)?;

        let params = SettingsRepository::get_parameters(pool)
            .await?
            .ranking_parameters()?;
        table.validate_against(&params).map_err(Self::rejected)?;

        SettingsRepository::replace_grade_thresholds(pool, table.thresholds()).await?;
        tracing::info!(grades = table.thresholds().len(), "Grade table replaced");

        Ok(GradeTableResponse {
            thresholds: table.thresholds().to_vec(),
        })
    }

    /// Get the class to category allotment
    pub async fn get_class_categories(pool: &SqlitePool) -> AppResult<ClassCategoriesResponse> {
        Ok(ClassCategoriesResponse {
            classes: SettingsRepository::list_class_categories(pool).await?,
        })
    }

    /// Replace the class to category allotment.
    ///
    /// Students already on the roster move to the category of their class.
    pub async fn replace_class_categories(
        pool: &SqlitePool,
        payload: ReplaceClassCategoriesRequest,
    ) -> AppResult<ClassCategoriesResponse> {
        let mut seen = HashSet::new();
        let mut classes = Vec::with_capacity(payload.classes.len());
        for entry in payload.classes {
            let class = Self::name(&entry.class)?;
            if !seen.insert(class.to_lowercase()) {
                return Err(AppError::Validation(format!(
                    "Class allotted more than once: {}",
                    class
                )));
            }
            classes.push(ClassCategory {
                class,
                category: Self::name(&entry.category)?,
            });
        }

        let moved = SettingsRepository::replace_class_categories(pool, &classes).await?;
        tracing::info!(classes = classes.len(), moved, "Class allotment replaced");

        Self::get_class_categories(pool).await
    }

    async fn stored_thresholds(pool: &SqlitePool) -> AppResult<Vec<GradeThreshold>> {
        SettingsRepository::list_grade_thresholds(pool)
            .await?
            .iter()
            .map(|row| row.threshold())
            .collect()
    }

    // Settings come from the caller, so a bad value is a rejected request
    fn rejected(err: ScoringError) -> AppError {
        match err {
            ScoringError::Configuration(msg) | ScoringError::Validation(msg) => {
                AppError::Validation(msg)
            }
        }
    }

    fn name(value: &str) -> AppResult<String> {
        validate_name(value).map_err(|e| AppError::Validation(format!("{}: {:?}", e, value)))
    }

    fn to_parameters_response(row: &ParametersRow) -> AppResult<ParametersResponse> {
        let params = row.ranking_parameters()?;
        Ok(ParametersResponse {
            number_of_judges: params.number_of_judges,
            max_marks_per_judge: params.max_marks_per_judge,
            min_marks_for_prize: params.min_marks_for_prize,
            consolation_allowed: params.consolation_allowed,
            max_events_per_student: row.max_events_per_student()?,
            max_total: params.max_total(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::test_pool,
        handlers::settings::request::{ClassCategoryRequest, GradeThresholdRequest},
    };

    fn params_request(judges: u32, max_marks: u32, min_for_prize: u32) -> UpdateParametersRequest {
        UpdateParametersRequest {
            number_of_judges: judges,
            max_marks_per_judge: max_marks,
            min_marks_for_prize: min_for_prize,
            consolation_allowed: true,
            max_events_per_student: 4,
        }
    }

    fn grades(pairs: &[(&str, u32)]) -> ReplaceGradeTableRequest {
        ReplaceGradeTableRequest {
            thresholds: pairs
                .iter()
                .map(|(grade, min_marks)| GradeThresholdRequest {
                    grade: grade.to_string(),
                    min_marks: *min_marks,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_update_parameters() {
        let pool = test_pool().await;

        let updated = SettingsService::update_parameters(&pool, params_request(5, 10, 22))
            .await
            .unwrap();
        assert_eq!(updated.max_total, 50);

        let stored = SettingsService::get_parameters(&pool).await.unwrap();
        assert_eq!(stored.number_of_judges, 5);
        assert_eq!(stored.min_marks_for_prize, 22);
        assert_eq!(stored.max_events_per_student, 4);
        assert!(stored.consolation_allowed);
    }

    #[tokio::test]
    async fn test_unreachable_prize_threshold_rejected() {
        let pool = test_pool().await;

        let err = SettingsService::update_parameters(&pool, params_request(3, 10, 31))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_parameters_cannot_strand_grade_table() {
        let pool = test_pool().await;
        SettingsService::replace_grade_table(&pool, grades(&[("A", 28), ("B", 20)]))
            .await
            .unwrap();

        let err = SettingsService::update_parameters(&pool, params_request(2, 10, 5))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_replace_grade_table_sorts_and_validates() {
        let pool = test_pool().await;

        let table = SettingsService::replace_grade_table(
            &pool,
            grades(&[("A", 25), ("F", 5), ("B", 20)]),
        )
        .await
        .unwrap();
        let order: Vec<&str> = table.thresholds.iter().map(|t| t.grade.as_str()).collect();
        assert_eq!(order, vec!["F", "B", "A"]);

        let err = SettingsService::replace_grade_table(&pool, grades(&[("A", 40)]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = SettingsService::replace_grade_table(&pool, grades(&[("A", 20), ("B", 20)]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // Failed replacements leave the stored table untouched
        let stored = SettingsService::get_grade_table(&pool).await.unwrap();
        assert_eq!(stored.thresholds.len(), 3);
    }

    fn classes(pairs: &[(&str, &str)]) -> ReplaceClassCategoriesRequest {
        ReplaceClassCategoriesRequest {
            classes: pairs
                .iter()
                .map(|(class, category)| ClassCategoryRequest {
                    class: class.to_string(),
                    category: category.to_string(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_replace_class_categories() {
        let pool = test_pool().await;

        let table = SettingsService::replace_class_categories(
            &pool,
            classes(&[("11", "Senior"), ("lkg", "Kids"), ("12", "Senior")]),
        )
        .await
        .unwrap();
        let order: Vec<&str> = table.classes.iter().map(|c| c.class.as_str()).collect();
        assert_eq!(order, vec!["lkg", "11", "12"]);

        let err = SettingsService::replace_class_categories(
            &pool,
            classes(&[("lkg", "Kids"), ("LKG", "Senior")]),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let stored = SettingsService::get_class_categories(&pool).await.unwrap();
        assert_eq!(stored.classes.len(), 3);
    }
}
