// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

// Common test utilities for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Owners handlers: three route handlers, one of them with a JSON body.
pub const OWNER_HANDLERS: &str = r#"use actix_web::{get, post, put, web, HttpResponse, Responder};

#[post("/owners")]
pub async fn create_owner(
    state: web::Data<AppState>,
    dto: web::Json<CreateOwnerDto>,
) -> impl Responder {
    HttpResponse::Created().finish()
}

#[get("/owners/{id}")]
pub async fn get_owner(state: web::Data<AppState>, id: web::Path<Uuid>) -> impl Responder {
    HttpResponse::Ok().finish()
}

#[put("/owners/{id}")]
pub async fn update_owner(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    dto: web::Json<UpdateOwnerDto>,
) -> impl Responder {
    HttpResponse::Ok().finish()
}
"#;

/// Auth handlers: login is unauthenticated.
pub const AUTH_HANDLERS: &str = r#"use actix_web::{post, web, HttpResponse, Responder};

#[post("/auth/login")]
pub async fn login(data: web::Data<AppState>, request: web::Json<LoginRequest>) -> impl Responder {
    HttpResponse::Ok().finish()
}
"#;

/// Building handlers with a public endpoint.
pub const BUILDING_HANDLERS: &str = r#"use actix_web::{delete, get, web, HttpResponse, Responder};

#[get("/public/buildings/{slug}")]
pub async fn get_public_building(state: web::Data<AppState>, slug: web::Path<String>) -> impl Responder {
    HttpResponse::Ok().finish()
}

#[delete("/buildings/{id}")]
pub async fn delete_building(state: web::Data<AppState>, id: web::Path<Uuid>) -> impl Responder {
    HttpResponse::NoContent().finish()
}
"#;

/// A handlers file whose functions are not recognized as route handlers.
pub const HELPER_ONLY: &str = r"use actix_web::HttpResponse;

pub fn not_found() -> HttpResponse {
    HttpResponse::NotFound().finish()
}
";

/// Create an empty handlers directory.
pub fn handlers_dir() -> TempDir {
    TempDir::new().expect("create temp handlers dir")
}

/// Write `content` to `dir/name` and return the path.
pub fn write_handler(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write handler fixture");
    path
}

/// Read a file back as text.
pub fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("read fixture")
}

/// Populate `dir` with five handler files, three of which contain handlers,
/// plus a `mod.rs` that must be ignored.
pub fn write_standard_fixture(dir: &Path) -> Vec<PathBuf> {
    let files = vec![
        write_handler(dir, "auth_handlers.rs", AUTH_HANDLERS),
        write_handler(dir, "building_handlers.rs", BUILDING_HANDLERS),
        write_handler(dir, "health_handlers.rs", HELPER_ONLY),
        write_handler(dir, "owner_handlers.rs", OWNER_HANDLERS),
        write_handler(dir, "stats_handlers.rs", "// placeholder\n"),
    ];
    write_handler(dir, "mod.rs", "pub mod auth_handlers;\n");
    files
}

/// Number of files in `dir` whose name ends with `suffix`.
pub fn count_with_suffix(dir: &Path, suffix: &str) -> usize {
    fs::read_dir(dir)
        .expect("list fixture dir")
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(suffix))
        .count()
}
