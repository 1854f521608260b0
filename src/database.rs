// ABOUTME: SQLite storage layer for users and health profiles
// ABOUTME: Enforces one-profile-per-user at the schema level and provides upsert semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Database Management
//!
//! This module provides database functionality for the NutriPlan server:
//! user storage and the per-user health profile store. The
//! one-profile-per-user invariant lives in the schema (`user_id` is the
//! profile table's primary key), so it holds under concurrent writers
//! without application-level locking; concurrent upserts for the same user
//! resolve last-write-wins inside SQLite.

use crate::models::{HealthProfile, ProfileUpdate, User};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

/// Database manager for user and profile storage
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection and run migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = if database_url.contains(":memory:") {
            // A pooled second connection would open a fresh empty database
            SqlitePoolOptions::new()
                .max_connections(1)
                .connect(database_url)
                .await?
        } else {
            // Ensure SQLite creates the database file if it doesn't exist
            let connection_options = if database_url.starts_with("sqlite:") {
                format!("{database_url}?mode=rwc")
            } else {
                database_url.to_owned()
            };
            SqlitePool::connect(&connection_options).await?
        };

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Run database migrations
    async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                username TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL,
                last_active TEXT NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT 1
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(&self.pool)
            .await?;

        // user_id is the primary key: at most one profile per user, enforced
        // by the storage engine rather than application logic
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS health_profiles (
                user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                age INTEGER NOT NULL,
                gender TEXT NOT NULL,
                height_ft REAL NOT NULL,
                weight_kg REAL NOT NULL,
                bmi REAL,
                chronic_disease TEXT,
                blood_pressure_systolic REAL,
                blood_pressure_diastolic REAL,
                cholesterol_level REAL,
                blood_sugar_level REAL,
                genetic_risk_factor TEXT,
                allergies TEXT,
                food_aversion TEXT,
                daily_steps INTEGER,
                exercise_frequency TEXT,
                sleep_hours REAL,
                alcohol_consumption TEXT,
                smoking_habit TEXT,
                dietary_habits TEXT,
                preferred_cuisine TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Save a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including unique-constraint
    /// violations on email or username (see [`is_unique_violation`]).
    pub async fn create_user(&self, user: &User) -> Result<Uuid> {
        sqlx::query(
            r"
            INSERT INTO users (id, email, username, password_hash, created_at, last_active, is_active)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at.to_rfc3339())
        .bind(user.last_active.to_rfc3339())
        .bind(user.is_active)
        .execute(&self.pool)
        .await?;

        Ok(user.id)
    }

    /// Look up a user by email (emails are stored lower-case).
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt.
    pub async fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email.to_lowercase())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    /// Look up a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt.
    pub async fn user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    /// Look up a user by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt.
    pub async fn user_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| Self::row_to_user(&r)).transpose()
    }

    /// Update a user's last-active timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub async fn update_last_active(&self, user_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE users SET last_active = ? WHERE id = ?")
            .bind(Utc::now().to_rfc3339())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete a user; the owned health profile cascades.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn delete_user(&self, user_id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Create or update the health profile for a user.
    ///
    /// A single atomic `INSERT .. ON CONFLICT(user_id) DO UPDATE`: required
    /// physical fields always overwrite, optional fields merge - a `None`
    /// leaves the stored value unchanged. Returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails or the stored row cannot be read
    /// back.
    pub async fn upsert_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<HealthProfile> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r"
            INSERT INTO health_profiles (
                user_id, age, gender, height_ft, weight_kg, bmi,
                chronic_disease, blood_pressure_systolic, blood_pressure_diastolic,
                cholesterol_level, blood_sugar_level, genetic_risk_factor,
                allergies, food_aversion, daily_steps, exercise_frequency,
                sleep_hours, alcohol_consumption, smoking_habit, dietary_habits,
                preferred_cuisine, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id) DO UPDATE SET
                age = excluded.age,
                gender = excluded.gender,
                height_ft = excluded.height_ft,
                weight_kg = excluded.weight_kg,
                bmi = excluded.bmi,
                chronic_disease = COALESCE(excluded.chronic_disease, health_profiles.chronic_disease),
                blood_pressure_systolic = COALESCE(excluded.blood_pressure_systolic, health_profiles.blood_pressure_systolic),
                blood_pressure_diastolic = COALESCE(excluded.blood_pressure_diastolic, health_profiles.blood_pressure_diastolic),
                cholesterol_level = COALESCE(excluded.cholesterol_level, health_profiles.cholesterol_level),
                blood_sugar_level = COALESCE(excluded.blood_sugar_level, health_profiles.blood_sugar_level),
                genetic_risk_factor = COALESCE(excluded.genetic_risk_factor, health_profiles.genetic_risk_factor),
                allergies = COALESCE(excluded.allergies, health_profiles.allergies),
                food_aversion = COALESCE(excluded.food_aversion, health_profiles.food_aversion),
                daily_steps = COALESCE(excluded.daily_steps, health_profiles.daily_steps),
                exercise_frequency = COALESCE(excluded.exercise_frequency, health_profiles.exercise_frequency),
                sleep_hours = COALESCE(excluded.sleep_hours, health_profiles.sleep_hours),
                alcohol_consumption = COALESCE(excluded.alcohol_consumption, health_profiles.alcohol_consumption),
                smoking_habit = COALESCE(excluded.smoking_habit, health_profiles.smoking_habit),
                dietary_habits = COALESCE(excluded.dietary_habits, health_profiles.dietary_habits),
                preferred_cuisine = COALESCE(excluded.preferred_cuisine, health_profiles.preferred_cuisine),
                updated_at = excluded.updated_at
            ",
        )
        .bind(user_id.to_string())
        .bind(update.age)
        .bind(&update.gender)
        .bind(update.height_ft)
        .bind(update.weight_kg)
        .bind(update.bmi)
        .bind(&update.chronic_disease)
        .bind(update.blood_pressure_systolic)
        .bind(update.blood_pressure_diastolic)
        .bind(update.cholesterol_level)
        .bind(update.blood_sugar_level)
        .bind(&update.genetic_risk_factor)
        .bind(&update.allergies)
        .bind(&update.food_aversion)
        .bind(update.daily_steps)
        .bind(&update.exercise_frequency)
        .bind(update.sleep_hours)
        .bind(&update.alcohol_consumption)
        .bind(&update.smoking_habit)
        .bind(&update.dietary_habits)
        .bind(&update.preferred_cuisine)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        self.profile_by_user(user_id)
            .await?
            .context("health profile missing immediately after upsert")
    }

    /// Fetch the health profile for a user, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is corrupt.
    pub async fn profile_by_user(&self, user_id: Uuid) -> Result<Option<HealthProfile>> {
        let row = sqlx::query("SELECT * FROM health_profiles WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| Self::row_to_profile(&r)).transpose()
    }

    /// Total number of stored health profiles.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn count_profiles(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM health_profiles")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("count")?)
    }

    fn row_to_user(row: &SqliteRow) -> Result<User> {
        Ok(User {
            id: parse_uuid(&row.try_get::<String, _>("id")?)?,
            email: row.try_get("email")?,
            username: row.try_get("username")?,
            password_hash: row.try_get("password_hash")?,
            created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
            last_active: parse_timestamp(&row.try_get::<String, _>("last_active")?)?,
            is_active: row.try_get("is_active")?,
        })
    }

    fn row_to_profile(row: &SqliteRow) -> Result<HealthProfile> {
        Ok(HealthProfile {
            user_id: parse_uuid(&row.try_get::<String, _>("user_id")?)?,
            age: row.try_get("age")?,
            gender: row.try_get("gender")?,
            height_ft: row.try_get("height_ft")?,
            weight_kg: row.try_get("weight_kg")?,
            bmi: row.try_get("bmi")?,
            chronic_disease: row.try_get("chronic_disease")?,
            blood_pressure_systolic: row.try_get("blood_pressure_systolic")?,
            blood_pressure_diastolic: row.try_get("blood_pressure_diastolic")?,
            cholesterol_level: row.try_get("cholesterol_level")?,
            blood_sugar_level: row.try_get("blood_sugar_level")?,
            genetic_risk_factor: row.try_get("genetic_risk_factor")?,
            allergies: row.try_get("allergies")?,
            food_aversion: row.try_get("food_aversion")?,
            daily_steps: row.try_get("daily_steps")?,
            exercise_frequency: row.try_get("exercise_frequency")?,
            sleep_hours: row.try_get("sleep_hours")?,
            alcohol_consumption: row.try_get("alcohol_consumption")?,
            smoking_habit: row.try_get("smoking_habit")?,
            dietary_habits: row.try_get("dietary_habits")?,
            preferred_cuisine: row.try_get("preferred_cuisine")?,
            created_at: parse_timestamp(&row.try_get::<String, _>("created_at")?)?,
            updated_at: parse_timestamp(&row.try_get::<String, _>("updated_at")?)?,
        })
    }
}

/// Whether an error from a `Database` operation is a unique-constraint
/// violation (duplicate email/username, or a racing profile insert).
#[must_use]
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<sqlx::Error>()
        .and_then(sqlx::Error::as_database_error)
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn parse_uuid(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).with_context(|| format!("invalid uuid in database: {raw}"))
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("invalid timestamp in database: {raw}"))?
        .with_timezone(&Utc))
}
