pub mod config_record;
