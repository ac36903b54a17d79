mod app_data_dir;

pub use app_data_dir::{
    app_config_path, app_data_dir, backups_dir, items_dir, logs_dir, settings_path,
};
