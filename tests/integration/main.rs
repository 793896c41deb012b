//! Integration tests with mock HTTP server

mod lifecycle;
mod mock_server;
mod prediction;
