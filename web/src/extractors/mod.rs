pub(crate) mod json_object;
