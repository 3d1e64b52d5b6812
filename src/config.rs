use std::net::SocketAddr;

use clap::{Args, Parser};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "daegwan",
    about = "Facility rental request intake service",
    version = crate::version::VERSION,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,
}

#[derive(Args, Debug, Clone)]
pub struct Config {
    #[arg(
        long,
        value_name = "ADDR",
        env = "DAEGWAN_BIND",
        default_value = "127.0.0.1:8520"
    )]
    pub bind: SocketAddr,

    /// Shared admin secret. Empty means the admin surface is disabled.
    #[arg(
        long,
        env = "DAEGWAN_ADMIN_PASSWORD",
        value_name = "PASSWORD",
        default_value = ""
    )]
    pub admin_password: String,

    #[arg(
        long,
        env = "DAEGWAN_FACILITY_NAME",
        value_name = "NAME",
        default_value = "facility-1"
    )]
    pub facility_name: String,

    #[arg(
        long,
        env = "DAEGWAN_CONTACT_PHONE",
        value_name = "PHONE",
        default_value = ""
    )]
    pub contact_phone: String,

    #[arg(
        long,
        env = "DAEGWAN_CONTACT_EMAIL",
        value_name = "EMAIL",
        default_value = ""
    )]
    pub contact_email: String,
}

impl Config {
    /// The configured shared secret, or `None` when admin access is disabled.
    pub fn admin_password(&self) -> Option<&str> {
        if self.admin_password.is_empty() {
            None
        } else {
            Some(self.admin_password.as_str())
        }
    }
}
