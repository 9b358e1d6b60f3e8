use super::canvas::VizAction;

mod form;
mod panels;

#[derive(Default)]
pub(in crate::app) struct FrameOutcome {
    pub(in crate::app) submit_requested: bool,
    pub(in crate::app) action: Option<VizAction>,
}
