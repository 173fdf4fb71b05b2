//! Unit tests for the server configuration and HTTP routes.

use super::*;
