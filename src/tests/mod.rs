//! Tests for the Mandrill API client.


#[cfg(test)]
mod models_tests;

#[cfg(test)]
mod services_tests;
