pub mod dispatcher;
pub mod ledger;
pub mod poller;
pub mod reporting;
pub mod scheduler;
pub mod validator;

#[cfg(test)]
mod dispatcher_tests;
