pub mod http;
pub mod mock_server;
pub mod state;
