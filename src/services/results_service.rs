//! Results service

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::{
    db::repositories::{EventRepository, ScoreRepository},
    error::{AppError, AppResult},
    handlers::results::response::{
        Certificate, CertificatesResponse, EventResultsResponse, JudgedEventsResponse,
        ParticipationResponse, ResultEntry,
    },
    models::{stored_u32, ParticipantDetail, Student},
    scoring::RankLabel,
    utils::{format_certificate_date, title_case},
};

/// Results service for finalized rankings and certificate data
pub struct ResultsService;

impl ResultsService {
    /// Category/event pairs with at least one graded row
    pub async fn list_judged(pool: &SqlitePool) -> AppResult<JudgedEventsResponse> {
        Ok(JudgedEventsResponse {
            events: ScoreRepository::list_judged(pool).await?,
        })
    }

    /// Registered students in total and per event
    pub async fn participation(
        pool: &SqlitePool,
        category: Option<&str>,
    ) -> AppResult<ParticipationResponse> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());

        Ok(ParticipationResponse {
            category: category.map(str::to_string),
            total_participants: ScoreRepository::participant_total(pool, category).await?,
            events: ScoreRepository::participant_counts(pool, category).await?,
        })
    }

    /// Non-disqualified prize holders, FIRST to CONSOLATION, then by class,
    /// division and name
    pub async fn event_results(
        pool: &SqlitePool,
        category: &str,
        event: &str,
    ) -> AppResult<EventResultsResponse> {
        let results = Self::prize_holders(pool, category, event)
            .await?
            .into_iter()
            .map(|(detail, rank)| {
                Ok(ResultEntry {
                    total_marks: stored_u32("total_marks", detail.total_marks)?,
                    admission_number: detail.admission_number,
                    name: detail.name,
                    class: detail.class,
                    division: detail.division,
                    house: detail.house,
                    grade: detail.grade,
                    rank,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(EventResultsResponse {
            category: category.to_string(),
            event: event.to_string(),
            results,
        })
    }

    /// Certificate records for every prize holder, dated `date`
    pub async fn certificates(
        pool: &SqlitePool,
        category: &str,
        event: &str,
        date: NaiveDate,
    ) -> AppResult<CertificatesResponse> {
        let event_title = title_case(&format!("{} - {}", category, event));
        let date = format_certificate_date(date);

        let certificates = Self::prize_holders(pool, category, event)
            .await?
            .into_iter()
            .map(|(detail, rank)| {
                let student = Student {
                    admission_number: detail.admission_number,
                    name: detail.name,
                    class: detail.class,
                    division: detail.division,
                    house: detail.house,
                    category: detail.category,
                };
                Certificate {
                    class_division: student.class_division(),
                    admission_number: student.admission_number,
                    student_name: student.name,
                    event_title: event_title.clone(),
                    prize: rank.prize_title().to_string(),
                    date: date.clone(),
                }
            })
            .collect();

        Ok(CertificatesResponse {
            category: category.to_string(),
            event: event.to_string(),
            certificates,
        })
    }

    async fn prize_holders(
        pool: &SqlitePool,
        category: &str,
        event: &str,
    ) -> AppResult<Vec<(ParticipantDetail, RankLabel)>> {
        if EventRepository::find_event(pool, event).await?.is_none() {
            return Err(AppError::NotFound(format!("Event not found: {}", event)));
        }

        ScoreRepository::prize_holders(pool, category, event)
            .await?
            .into_iter()
            .filter_map(|detail| {
                let rank = detail.rank.as_deref()?.parse::<RankLabel>();
                Some(rank.map(|rank| (detail, rank)).map_err(AppError::from))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::{
        db::{repositories::StudentRepository, test_pool},
        scoring::{JudgeMarks, ScoreRow},
    };

    async fn judged_pool() -> SqlitePool {
        let pool = test_pool().await;
        EventRepository::create_event(&pool, "group dance", false).await.unwrap();

        let roster = [
            ("1001", "Zara", "12", "D", Some(RankLabel::Second), false),
            ("1002", "Asha", "10", "A", Some(RankLabel::First), false),
            ("1003", "Ben", "9", "B", Some(RankLabel::First), false),
            ("1004", "Cy", "9", "B", None, false),
            ("1005", "Dev", "11", "C", Some(RankLabel::Third), true),
            ("1006", "Eli", "ukg", "A", Some(RankLabel::Consolation), false),
        ];
        let students: Vec<Student> = roster
            .iter()
            .map(|(adm, name, class, division, _, _)| Student {
                admission_number: adm.to_string(),
                name: name.to_string(),
                class: class.to_string(),
                division: division.to_string(),
                house: None,
                category: "category 1".to_string(),
            })
            .collect();
        StudentRepository::upsert_many(&pool, &students).await.unwrap();

        let events: BTreeSet<String> = ["group dance".to_string()].into();
        let mut rows = Vec::new();
        for (adm, _, _, _, rank, disqualified) in roster {
            StudentRepository::replace_registration(&pool, adm, None, &events)
                .await
                .unwrap();
            let mut row = ScoreRow::new(adm, JudgeMarks::from_marks([5, 5, 5]))
                .disqualified(disqualified);
            row.total = 15;
            row.grade = Some("C".to_string());
            row.rank = rank;
            rows.push(row);
        }
        ScoreRepository::save_scores(&pool, "group dance", &rows).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_event_results_order_and_filter() {
        let pool = judged_pool().await;

        let results = ResultsService::event_results(&pool, "category 1", "group dance")
            .await
            .unwrap();
        let order: Vec<&str> = results
            .results
            .iter()
            .map(|r| r.admission_number.as_str())
            .collect();
        // FIRST by class (text order), then SECOND, then CONSOLATION;
        // the disqualified THIRD and the unranked row are left out
        assert_eq!(order, vec!["1002", "1003", "1001", "1006"]);
        assert_eq!(results.results[0].total_marks, 15);
    }

    #[tokio::test]
    async fn test_certificates() {
        let pool = judged_pool().await;
        let date = NaiveDate::from_ymd_opt(2024, 12, 5).unwrap();

        let response = ResultsService::certificates(&pool, "category 1", "group dance", date)
            .await
            .unwrap();
        assert_eq!(response.certificates.len(), 4);

        let first = &response.certificates[0];
        assert_eq!(first.student_name, "Asha");
        assert_eq!(first.class_division, "X - A");
        assert_eq!(first.event_title, "Category 1 - Group Dance");
        assert_eq!(first.prize, "First Prize");
        assert_eq!(first.date, "05-12-2024");

        let last = &response.certificates[3];
        assert_eq!(last.class_division, "UKG - A");
        assert_eq!(last.prize, "Consolation Prize");
    }

    #[tokio::test]
    async fn test_unknown_event_and_judged_listing() {
        let pool = judged_pool().await;

        let err = ResultsService::event_results(&pool, "category 1", "chess")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let judged = ResultsService::list_judged(&pool).await.unwrap();
        assert_eq!(judged.events.len(), 1);
        assert_eq!(judged.events[0].event_name, "group dance");
    }

    #[tokio::test]
    async fn test_participation_counts() {
        let pool = judged_pool().await;
        EventRepository::create_event(&pool, "essay", false).await.unwrap();
        let other = Student {
            admission_number: "2001".to_string(),
            name: "Fay".to_string(),
            class: "3".to_string(),
            division: "A".to_string(),
            house: None,
            category: "category 2".to_string(),
        };
        StudentRepository::upsert_many(&pool, &[other]).await.unwrap();
        let events: BTreeSet<String> = ["essay".to_string(), "group dance".to_string()].into();
        StudentRepository::replace_registration(&pool, "2001", None, &events)
            .await
            .unwrap();

        let all = ResultsService::participation(&pool, None).await.unwrap();
        assert_eq!(all.total_participants, 7);
        let counts: Vec<(&str, i64)> = all
            .events
            .iter()
            .map(|e| (e.event_name.as_str(), e.participants))
            .collect();
        assert_eq!(counts, vec![("essay", 1), ("group dance", 7)]);

        let second = ResultsService::participation(&pool, Some("category 2")).await.unwrap();
        assert_eq!(second.category.as_deref(), Some("category 2"));
        assert_eq!(second.total_participants, 1);
        assert_eq!(second.events.len(), 2);
    }
}
