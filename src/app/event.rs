use crossterm::event::Event as CrosstermEvent;

/// Tag on each estimate request, increasing in issue order.
pub type RequestId = u64;

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// Location list arrived from the service
    LocationsLoaded {
        locations: Vec<String>,
    },
    LocationsFailed {
        error: String,
    },

    /// Estimate request completed
    EstimateReady {
        request_id: RequestId,
        price: f64,
    },
    EstimateFailed {
        request_id: RequestId,
        error: String,
    },

    /// Tick for UI refresh
    Tick,
}
