use aquaflow_shared::req_args::Portion;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(
        short = 's',
        long = "stdout",
        action,
        help = "Controls if it logs to stdout/stderr instead of to a file"
    )]
    pub is_to_std_out: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check the stored session and print where the app would start
    Startup,
    /// Log in and print the home for the account's role
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account, the user then logs in separately
    Signup {
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long)]
        house_number: String,
        #[arg(long, default_value_t = Portion::Upper)]
        portion: Portion,
        #[arg(long)]
        area: String,
    },
    /// Email password reset instructions
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Remove the stored session
    Logout,
    /// Show the stored session
    Whoami,
}
