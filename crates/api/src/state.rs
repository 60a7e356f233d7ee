use tracklist_db::DbPool;

/// Handler state: the connection pool every route reads and writes through.
///
/// Server settings are consumed while building the router and are not kept
/// here.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
}
