use std::sync::Arc;

use haulboard_db::Database;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    /// Shared with the retention sweeper, which runs outside the router.
    pub db: Arc<Database>,
    /// Reject a registration whose name already exists. Off by default: the
    /// roster historically allowed duplicate names.
    pub unique_driver_names: bool,
}
