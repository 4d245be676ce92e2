pub(crate) mod dto;
pub(crate) mod post_service;
