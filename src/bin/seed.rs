//! Seed script for development — populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires a `DATABASE_URL` environment variable (reads .env).

use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const ADMIN_PASSWORD: &str = "Test123!";
const USER_PASSWORD: &str = "learner123";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    // Run migrations first
    sqlx::migrate!("./migrations").run(&pool).await?;

    println!("=== TaskForge Seed Script ===");

    let user_ids = seed_users(&pool).await?;
    let task_ids = seed_tasks(&pool).await?;
    seed_assignments(&pool, &user_ids, &task_ids).await?;
    seed_achievements(&pool, &user_ids).await?;

    println!("\n=== Seed complete! ===");
    println!("Admin login: admin / {ADMIN_PASSWORD}");
    println!("User logins: ada, grace, linus, margaret / {USER_PASSWORD}");

    Ok(())
}

async fn seed_users(pool: &PgPool) -> anyhow::Result<Vec<Uuid>> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Users already exist ({count})");
        let ids = sqlx::query_scalar("SELECT id FROM users WHERE role = 'user' ORDER BY username")
            .fetch_all(pool)
            .await?;
        return Ok(ids);
    }

    let admin_hash = taskforge::services::auth::hash_password(ADMIN_PASSWORD)?;
    let admin_id: Uuid = sqlx::query_scalar(
        "INSERT INTO users (username, email, password_hash, display_name, role)
         VALUES ('admin', 'admin@taskforge.local', $1, 'Platform Administrator', 'admin')
         RETURNING id",
    )
    .bind(&admin_hash)
    .fetch_one(pool)
    .await?;
    sqlx::query("INSERT INTO profiles (id, full_name, email) VALUES ($1, 'Platform Administrator', 'admin@taskforge.local')")
        .bind(admin_id)
        .execute(pool)
        .await?;

    let learners = [
        ("ada", "Ada Lovelace"),
        ("grace", "Grace Hopper"),
        ("linus", "Linus Pauling"),
        ("margaret", "Margaret Hamilton"),
    ];

    let user_hash = taskforge::services::auth::hash_password(USER_PASSWORD)?;
    let mut ids = Vec::new();
    for (username, full_name) in learners {
        let email = format!("{username}@taskforge.local");
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO users (username, email, password_hash, display_name, role)
             VALUES ($1, $2, $3, $4, 'user')
             RETURNING id",
        )
        .bind(username)
        .bind(&email)
        .bind(&user_hash)
        .bind(full_name)
        .fetch_one(pool)
        .await?;

        sqlx::query("INSERT INTO profiles (id, full_name, email) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(full_name)
            .bind(&email)
            .execute(pool)
            .await?;
        ids.push(id);
    }

    println!("[done] Created admin and {} learners", ids.len());
    Ok(ids)
}

async fn seed_tasks(pool: &PgPool) -> anyhow::Result<Vec<Uuid>> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Tasks already exist ({count})");
        let ids = sqlx::query_scalar("SELECT id FROM tasks ORDER BY title")
            .fetch_all(pool)
            .await?;
        return Ok(ids);
    }

    let now = Utc::now();
    let tasks = [
        ("SQL Joins Quiz", "quiz", "easy", "backend", Some(now + Duration::days(2)), 30),
        ("Rate Limiter Kata", "coding", "hard", "backend", Some(now + Duration::days(9)), 120),
        ("Accessibility Audit", "review", "medium", "frontend", Some(now + Duration::days(5)), 60),
        ("HTTP Caching Quiz", "quiz", "medium", "backend", None, 20),
        ("Component Refactor", "coding", "medium", "frontend", Some(now + Duration::days(16)), 90),
        ("Security Checklist", "reading", "easy", "fullstack", Some(now - Duration::days(1)), 45),
    ];

    let mut ids = Vec::new();
    for (title, task_type, difficulty, role, deadline, duration) in tasks {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO tasks (title, task_type, difficulty, role, deadline, duration_minutes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(title)
        .bind(task_type)
        .bind(difficulty)
        .bind(role)
        .bind(deadline)
        .bind(duration)
        .fetch_one(pool)
        .await?;
        ids.push(id);
    }

    println!("[done] Created {} sample tasks", ids.len());
    Ok(ids)
}

async fn seed_assignments(
    pool: &PgPool,
    user_ids: &[Uuid],
    task_ids: &[Uuid],
) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM task_assignments")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Assignments already exist ({count})");
        return Ok(());
    }

    // Spread statuses so both dashboards have material: completions for the
    // leaderboard, submissions for the review queue, scores for quiz means.
    let mut created = 0;
    for (ui, &user_id) in user_ids.iter().enumerate() {
        for (ti, &task_id) in task_ids.iter().enumerate() {
            let (status, score) = match (ui + ti) % 4 {
                0 => ("completed", Some(80 + ((ui * 7 + ti * 3) % 21) as i32)),
                1 => ("in_progress", None),
                2 => ("submitted", None),
                _ => ("pending", None),
            };

            sqlx::query(
                "INSERT INTO task_assignments (user_id, task_id, status, score, started_at, updated_at)
                 VALUES ($1, $2, $3::assignment_status, $4, NOW() - INTERVAL '3 days', NOW() - ($5 || ' hours')::INTERVAL)",
            )
            .bind(user_id)
            .bind(task_id)
            .bind(status)
            .bind(score)
            .bind(((ui * task_ids.len() + ti) % 48).to_string())
            .execute(pool)
            .await?;
            created += 1;
        }
    }

    println!("[done] Created {created} assignments");
    Ok(())
}

async fn seed_achievements(pool: &PgPool, user_ids: &[Uuid]) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_achievements")
        .fetch_one(pool)
        .await?;

    if count > 0 {
        println!("[skip] Achievements already exist ({count})");
        return Ok(());
    }

    let mut created = 0;
    for (i, &user_id) in user_ids.iter().enumerate() {
        let grants: &[(&str, i32, i32, i64)] = match i % 3 {
            // (badge, streak_days, xp, days_ago)
            0 => &[("First Task", 3, 350, 10), ("Speed Demon", 9, 700, 1)],
            1 => &[("First Task", 5, 450, 4)],
            _ => &[],
        };

        for &(badge, streak, xp, days_ago) in grants {
            sqlx::query(
                "INSERT INTO user_achievements (user_id, streak_days, xp_points, badge_name, earned_at)
                 VALUES ($1, $2, $3, $4, NOW() - ($5 || ' days')::INTERVAL)",
            )
            .bind(user_id)
            .bind(streak)
            .bind(xp)
            .bind(badge)
            .bind(days_ago.to_string())
            .execute(pool)
            .await?;
            created += 1;
        }
    }

    println!("[done] Created {created} achievement records");
    Ok(())
}
