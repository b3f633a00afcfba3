use coachdesk::logging::init_tracing;
use coachdesk::router::init_router;
use coachdesk::state::init_app_state;
use dotenvy::dotenv;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    // Check if this is a CLI command
    if args.len() > 1 && args[1] == "create-rootadmin" {
        handle_create_rootadmin(args).await;
        return;
    }

    // Normal server startup; the guards keep the file appenders alive.
    let _log_guards = init_tracing();

    let state = init_app_state().await;
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await.unwrap();
    println!("🚀 Server running on http://localhost:8080");
    println!("📚 Swagger UI available at http://localhost:8080/swagger-ui");
    println!("📖 Scalar UI available at http://localhost:8080/scalar");
    axum::serve(listener, app).await.unwrap();
}

async fn handle_create_rootadmin(args: Vec<String>) {
    if args.len() != 6 {
        eprintln!(
            "Usage: {} create-rootadmin <name> <email> <password> <phone_number>",
            args[0]
        );
        std::process::exit(1);
    }

    let name = &args[2];
    let email = &args[3];
    let password = &args[4];
    let phone_number = &args[5];

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    match coachdesk::cli::create_root_admin(&pool, name, email, password, phone_number).await {
        Ok(()) => {
            println!("✅ Root admin created successfully!");
            println!("   Email: {}", email);
            println!("   Name: {}", name);
        }
        Err(e) => {
            eprintln!("❌ Error creating root admin: {}", e.error);
            std::process::exit(1);
        }
    }
}
