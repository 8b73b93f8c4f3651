use sql_data_provider::{DataLayer, DbConn};

use self::credential_offers::CredentialOffersDB;
use self::status_lists::StatusListsDB;


pub struct DbClient {
    pub credential_offers: CredentialOffersDB,
    pub status_lists: StatusListsDB,
}

impl DbClient {
    pub fn new(db: DbConn) -> Self {
        let data_layer = DataLayer::build(db);

        Self {
            credential_offers: CredentialOffersDB::new(&data_layer),
            status_lists: StatusListsDB::new(&data_layer),
        }
    }
}
