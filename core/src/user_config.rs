/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};
use uuid::Uuid;

use super::types::*;

pub async fn get_by_code(
    db: &DatabaseConnection,
    user_id: Uuid,
    code: &str,
) -> Result<Option<MUserConfig>, DbErr> {
    EUserConfig::find()
        .filter(
            Condition::all()
                .add(CUserConfig::User.eq(user_id))
                .add(CUserConfig::Code.eq(code)),
        )
        .one(db)
        .await
}

/// Stores `value` under `(user, code)` in one statement. The first write
/// creates the row, later writes update it in place.
pub async fn update_by_code(
    db: &DatabaseConnection,
    user_id: Uuid,
    code: &str,
    value: String,
) -> Result<MUserConfig, DbErr> {
    let aconfig = AUserConfig {
        id: Set(Uuid::new_v4()),
        user: Set(user_id),
        code: Set(code.to_string()),
        value: Set(value),
        updated_at: Set(Utc::now().naive_utc()),
    };

    EUserConfig::insert(aconfig)
        .on_conflict(
            OnConflict::columns([CUserConfig::User, CUserConfig::Code])
                .update_columns([CUserConfig::Value, CUserConfig::UpdatedAt])
                .to_owned(),
        )
        .exec_with_returning(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn config(id: Uuid, user: Uuid, value: &str) -> MUserConfig {
        MUserConfig {
            id,
            user,
            code: "job-table".to_string(),
            value: value.to_string(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    #[tokio::test]
    async fn test_update_by_code_upserts_on_user_and_code() {
        let user = Uuid::new_v4();
        let id = Uuid::new_v4();
        let first = config(id, user, r#"{"columns":["number"]}"#);
        let second = config(id, user, r#"{"columns":["number","client"]}"#);

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![first.clone()]])
            .append_query_results([vec![second.clone()]])
            .into_connection();

        let inserted = update_by_code(&db, user, "job-table", first.value.clone())
            .await
            .unwrap();
        let updated = update_by_code(&db, user, "job-table", second.value.clone())
            .await
            .unwrap();

        assert_eq!(inserted.id, updated.id);
        assert_eq!(updated.value, second.value);

        let log = format!("{:?}", db.into_transaction_log());
        assert_eq!(log.matches("INSERT").count(), 2);
        assert_eq!(log.matches("ON CONFLICT").count(), 2);
        assert!(!log.contains("SELECT"), "{log}");
    }

    #[tokio::test]
    async fn test_get_by_code_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<MUserConfig>::new()])
            .into_connection();

        assert!(get_by_code(&db, Uuid::new_v4(), "job-table")
            .await
            .unwrap()
            .is_none());
    }
}
