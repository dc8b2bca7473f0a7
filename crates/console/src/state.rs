//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::api::UsersApi;
use crate::controller::FormController;

/// Controller type the console serves: any API behind a trait object.
pub type Controller = FormController<Arc<dyn UsersApi>>;

/// Console state. Handlers hold the controller lock for the whole request,
/// so actions never overlap.
#[derive(Clone)]
pub struct AppState {
    controller: Arc<Mutex<Controller>>,
}

impl AppState {
    pub fn new(api: Arc<dyn UsersApi>) -> Self {
        Self {
            controller: Arc::new(Mutex::new(FormController::new(api))),
        }
    }

    /// Lock the controller for one action.
    pub async fn controller(&self) -> MutexGuard<'_, Controller> {
        self.controller.lock().await
    }
}
