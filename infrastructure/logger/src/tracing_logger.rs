use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

/// `Logger` adapter tagging every event with the component that emitted it.
pub struct TracingLogger {
    component: &'static str,
}

impl TracingLogger {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "shop", component = self.component, "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "shop", component = self.component, "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "shop", component = self.component, "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "shop", component = self.component, "{}", message);
    }
}
