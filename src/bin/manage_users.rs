//! CLI tool to inspect users and assign roles.
//!
//! Usage:
//!   cargo run --bin manage-users -- list
//!   cargo run --bin manage-users -- set-role --id <user-id> --role ADMIN
//!
//! `set-role` is the only way to create the first ADMIN account.

use std::env;

use tracing::info;
use uuid::Uuid;

use claon_admin_lib::config::Config;
use claon_admin_lib::db::{DbPool, users};
use claon_admin_lib::models::Role;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let command = &args[1];
    if matches!(command.as_str(), "help" | "--help" | "-h") {
        print_usage();
        return;
    }

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match DbPool::new(&config.database).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error connecting to database: {}", e);
            std::process::exit(1);
        }
    };

    match command.as_str() {
        "list" | "ls" => list_users(&pool).await,
        "set-role" => {
            let id = parse_flag(&args, "--id", "-i");
            let role = parse_flag(&args, "--role", "-r");
            set_role(&pool, &id, &role).await;
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            std::process::exit(1);
        }
    }
}

fn parse_flag(args: &[String], long: &str, short: &str) -> String {
    args.windows(2)
        .skip(1)
        .find(|pair| pair[0] == long || pair[0] == short)
        .map(|pair| pair[1].clone())
        .unwrap_or_else(|| {
            eprintln!("Error: {} is required", long);
            std::process::exit(1);
        })
}

async fn list_users(pool: &DbPool) {
    let all = match users::find_all(pool.connection()).await {
        Ok(u) => u,
        Err(e) => {
            eprintln!("Error listing users: {}", e);
            std::process::exit(1);
        }
    };

    if all.is_empty() {
        println!("No users found.");
        return;
    }

    println!();
    println!(
        "{:<36} {:<20} {:<14} {:<30}",
        "ID", "NICKNAME", "ROLE", "SNS"
    );
    println!("{}", "-".repeat(100));

    for user in all {
        let nickname = user.nickname.as_deref().unwrap_or("-");
        println!(
            "{:<36} {:<20} {:<14} {:<30}",
            user.id,
            nickname,
            Role::of(&user),
            user.sns
        );
    }
    println!();
}

async fn set_role(pool: &DbPool, id: &str, role: &str) {
    let Ok(id) = Uuid::parse_str(id) else {
        eprintln!("Error: '{}' is not a valid user id", id);
        std::process::exit(1);
    };
    let Some(role) = Role::parse(role) else {
        eprintln!("Error: unknown role '{}'", role);
        eprintln!("Valid roles: PENDING, LECTOR, CENTER_ADMIN, ADMIN");
        std::process::exit(1);
    };

    match users::update_role(pool.connection(), id, role).await {
        Ok(user) => {
            info!(user_id = %user.id, role = %role, "Role assigned from CLI");
            println!("User {} is now {}.", user.id, role);
        }
        Err(e) => {
            eprintln!("Error updating role: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!();
    eprintln!("Usage: manage-users <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  list, ls                         List all users");
    eprintln!("  set-role --id <id> --role <ROLE> Assign a role (PENDING, LECTOR, CENTER_ADMIN, ADMIN)");
    eprintln!("  help                             Show this help");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  manage-users list");
    eprintln!("  manage-users set-role --id 0190b7a2-5c1e-7c3a-9f1e-2b3c4d5e6f70 --role ADMIN");
    eprintln!();
}
