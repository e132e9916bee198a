use sea_orm::*;
use sea_orm::sea_query::{Index, SqliteQueryBuilder};
use tracing::info;

use crate::config::AdminSeedConfig;
use crate::entity::{role, role_permission, score, user};
use crate::utils::hash;

/// Default roles seeded on startup.
const DEFAULT_ROLES: &[&str] = &[role::ADMIN_ROLE, "scorer"];

/// Default role-permission mappings seeded on startup.
const DEFAULT_MAPPINGS: &[(&str, &str)] = &[
    // Admin: all permissions
    ("admin", "department:manage"),
    ("admin", "score:manage"),
    // Scorer: result entry only
    ("scorer", "score:manage"),
];

/// Seed the `role` and `role_permission` tables with defaults.
pub async fn seed_role_permissions(db: &DatabaseConnection) -> Result<(), DbErr> {
    let mut roles_inserted = 0u32;
    for &name in DEFAULT_ROLES {
        let model = role::ActiveModel {
            name: Set(name.to_string()),
        };

        let result = role::Entity::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(role::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(n) if n > 0 => roles_inserted += 1,
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if roles_inserted > 0 {
        info!("Seeded {} new roles", roles_inserted);
    }

    let mut perms_inserted = 0u32;
    for &(role, permission) in DEFAULT_MAPPINGS {
        let model = role_permission::ActiveModel {
            role: Set(role.to_string()),
            permission: Set(permission.to_string()),
        };

        let result = role_permission::Entity::insert(model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    role_permission::Column::Role,
                    role_permission::Column::Permission,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(db)
            .await;

        match result {
            Ok(n) if n > 0 => perms_inserted += 1,
            Ok(_) | Err(DbErr::RecordNotInserted) => {}
            Err(e) => return Err(e),
        }
    }

    if perms_inserted > 0 {
        info!("Seeded {} new role-permission mappings", perms_inserted);
    }

    Ok(())
}

/// Create the configured administrator account unless the username already exists.
///
/// An existing account is left untouched, so a password changed later is not reset.
pub async fn seed_admin_user(db: &DatabaseConnection, admin: &AdminSeedConfig) -> Result<(), DbErr> {
    let username = admin.username.trim();
    let exists = user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?
        .is_some();
    if exists {
        return Ok(());
    }

    let password = hash::hash_password(&admin.password)
        .map_err(|e| DbErr::Custom(format!("Password hash error: {e}")))?;

    user::ActiveModel {
        username: Set(username.to_string()),
        password: Set(password),
        role: Set(role::ADMIN_ROLE.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(username, "Seeded administrator account");
    Ok(())
}

/// Ensure required database indexes exist.
///
/// SeaORM's schema-sync doesn't support composite non-unique indexes,
/// so we create them manually on startup.
pub async fn ensure_indexes(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Composite index for the standings reads:
    // SELECT ... FROM score WHERE category = ? AND is_active = 1
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_score_category_active")
        .table(score::Entity)
        .col(score::Column::Category)
        .col(score::Column::IsActive)
        .to_string(SqliteQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => {
            info!("Ensured index idx_score_category_active exists");
        }
        Err(e) => {
            tracing::warn!("Failed to create index idx_score_category_active: {}", e);
        }
    }

    Ok(())
}
