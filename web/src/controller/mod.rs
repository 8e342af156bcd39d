pub(crate) mod analysis_controller;
pub(crate) mod batch_analysis_controller;
pub(crate) mod health_check_controller;

#[cfg(test)]
pub(crate) mod test_helpers;
