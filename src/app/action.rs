use crate::app::event::RequestId;
use crate::app::state::FormInput;

#[derive(Debug, PartialEq)]
pub enum Action {
    FetchLocations,
    FetchEstimate { request_id: RequestId, input: FormInput },
    Quit,
}
