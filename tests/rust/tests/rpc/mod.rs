//! RPC transport tests
//!
//! The remote client against a mocked server, and the full
//! gateway → client → RPC server → SQLite path over real sockets.

mod round_trip;
