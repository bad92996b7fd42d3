mod test_concurrent_create_single_connection;
mod test_get_or_create_idempotent;
mod test_remove_creates_fresh_connection;
