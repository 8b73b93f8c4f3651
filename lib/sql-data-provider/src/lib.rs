use std::sync::Arc;

use credential_offer::CredentialOfferProvider;
use issuer_core::repository::DataRepository;
use issuer_core::repository::credential_offer_repository::CredentialOfferRepository;
use issuer_core::repository::status_list_repository::StatusListRepository;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
use status_list::StatusListProvider;

mod entity;
mod mapper;

pub mod credential_offer;
pub mod status_list;

#[cfg(test)]
pub mod test_utilities;

pub type DbConn = DatabaseConnection;

#[derive(Clone)]
pub struct DataLayer {
    // Used for tests for now
    #[allow(unused)]
    db: DatabaseConnection,
    credential_offer_repository: Arc<dyn CredentialOfferRepository>,
    status_list_repository: Arc<dyn StatusListRepository>,
}

impl DataLayer {
    pub fn build(db: DbConn) -> Self {
        let status_list_repository = Arc::new(StatusListProvider { db: db.clone() });
        let credential_offer_repository = Arc::new(CredentialOfferProvider {
            db: db.clone(),
            status_list_repository: status_list_repository.clone(),
        });

        Self {
            credential_offer_repository,
            status_list_repository,
            db,
        }
    }
}

/// Connects to the database, optionally bringing the schema up to date
pub async fn db_conn(
    database_url: impl Into<String>,
    run_migrations: bool,
) -> Result<DbConn, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options.sqlx_logging(false);

    let db = sea_orm::Database::connect(options).await?;

    if run_migrations {
        Migrator::up(&db, None).await?;
        tracing::debug!("Database migrations applied");
    }

    Ok(db)
}

impl DataRepository for DataLayer {
    fn get_credential_offer_repository(&self) -> Arc<dyn CredentialOfferRepository> {
        self.credential_offer_repository.clone()
    }

    fn get_status_list_repository(&self) -> Arc<dyn StatusListRepository> {
        self.status_list_repository.clone()
    }
}
