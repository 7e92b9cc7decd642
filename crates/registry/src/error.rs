//! Fatal startup errors from healer registration.

use thiserror::Error;

/// Registration failures are always fatal — the daemon cannot safely start
/// with a healer that violates the plugin contract.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("healer for resource type {resource_type:?} declares an empty resource_type")]
    EmptyResourceType { resource_type: String },

    #[error("healer for resource type {resource_type:?} subscribes to no operations")]
    EmptyOperations { resource_type: String },

    #[error(
        "healer for resource type {resource_type:?} declares config_file {config_file:?} \
         but it was not found at /etc/contrail-healer/{config_file} or \
         ~/.config/contrail-healer/{config_file}"
    )]
    MissingConfigFile { resource_type: String, config_file: String },

    #[error(
        "healer for resource type {resource_type:?} config_file {config_file:?} failed to parse: {source}"
    )]
    InvalidConfigFile {
        resource_type: String,
        config_file: String,
        #[source]
        source: ini::Error,
    },
}
