// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for annotation rendering.

#[cfg(test)]
mod tests {
    use crate::config::{AnnotationPolicy, TagMapping};
    use crate::generator::*;
    use crate::handler::{HandlerRecord, HttpMethod};
    use crate::parser::HandlerParser;
    use std::path::Path;

    fn generator() -> AnnotationGenerator {
        AnnotationGenerator::new(AnnotationPolicy::default())
    }

    fn record(
        method: HttpMethod,
        path: &str,
        name: &str,
        params: &[&str],
        tag: &str,
    ) -> HandlerRecord {
        HandlerRecord::new(
            method,
            path,
            name,
            params.iter().map(|p| (*p).to_string()).collect(),
            tag,
        )
    }

    #[test]
    fn test_success_status_by_method() {
        assert_eq!(success_response(HttpMethod::Post).status, 201);
        assert_eq!(success_response(HttpMethod::Delete).status, 204);
        assert_eq!(success_response(HttpMethod::Get).status, 200);
        assert_eq!(success_response(HttpMethod::Put).status, 200);
        assert_eq!(success_response(HttpMethod::Patch).status, 200);
    }

    #[test]
    fn test_building_get_scenario() {
        let source = r#"
#[get("/buildings/{id}")]
pub async fn get_building(state: web::Data<AppState>, id: web::Path<Uuid>) -> impl Responder {
    HttpResponse::Ok().finish()
}
"#;
        let parsed = HandlerParser::new(TagMapping::builtin())
            .parse_text(Path::new("building_handlers.rs"), source);
        assert_eq!(parsed.records.len(), 1);

        let block = generator().render(&parsed.records[0]);
        let expected = r#"#[utoipa::path(
    get,
    path = "/buildings/{id}",
    tag = "Buildings",
    summary = "Get Building",
    params(
        ("id" = String, Path, description = "Id"),
    ),
    responses(
        (status = 200, description = "Success"),
        (status = 400, description = "Bad Request"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Internal Server Error"),
    ),
    security(
        ("bearer_auth" = []),
    ),
)]"#;
        assert_eq!(block, expected);
        assert!(!block.contains("request_body"));
    }

    #[test]
    fn test_auth_login_scenario() {
        let source = r#"
#[post("/auth/login")]
pub async fn login(data: web::Data<AppState>, request: web::Json<LoginRequest>) -> impl Responder {
    HttpResponse::Ok().finish()
}
"#;
        let parsed = HandlerParser::new(TagMapping::builtin())
            .parse_text(Path::new("auth_handlers.rs"), source);
        let block = generator().render(&parsed.records[0]);

        assert!(block.contains("    post,\n"));
        assert!(block.contains("    tag = \"Auth\",\n"));
        assert!(block.contains("    request_body = LoginRequest,\n"));
        assert!(block.contains("(status = 201, description = \"Resource created successfully\"),"));
        assert!(!block.contains("status = 401"));
        assert!(!block.contains("status = 403"));
        assert!(!block.contains("security("));
        assert!(!block.contains("params("));
    }

    #[test]
    fn test_public_path_omits_security_but_keeps_auth_errors() {
        let r = record(
            HttpMethod::Get,
            "/public/buildings/{slug}",
            "get_public_building",
            &[],
            "Buildings",
        );
        let block = generator().render(&r);
        assert!(block.contains("status = 401"));
        assert!(block.contains("status = 403"));
        assert!(!block.contains("security("));
    }

    #[test]
    fn test_multiple_path_params_are_described() {
        let r = record(
            HttpMethod::Put,
            "/buildings/{building_id}/units/{unit_id}",
            "update_unit",
            &["dto: web::Json<UpdateUnitDto>"],
            "Units",
        );
        let lines = generator().render_lines(&r);
        assert!(lines.contains(&"    request_body = UpdateUnitDto,".to_string()));
        assert!(lines.contains(
            &"        (\"building_id\" = String, Path, description = \"Building Id\"),".to_string()
        ));
        assert!(lines.contains(
            &"        (\"unit_id\" = String, Path, description = \"Unit Id\"),".to_string()
        ));
    }

    #[test]
    fn test_repeated_path_param_rendered_once() {
        let r = record(HttpMethod::Get, "/a/{id}/b/{id}", "get_ab", &[], "A");
        let block = generator().render(&r);
        assert_eq!(block.matches("(\"id\" = String, Path").count(), 1);
    }

    #[test]
    fn test_render_is_idempotent() {
        let gen = generator();
        let records = [
            record(HttpMethod::Get, "/a/{id}", "get_a", &[], "A"),
            record(HttpMethod::Post, "/auth/x", "x", &["b: web::Json<B>"], "Auth"),
            record(HttpMethod::Delete, "/public/{z}", "drop_z", &[], "Z"),
        ];
        for r in &records {
            assert_eq!(gen.render(r), gen.render(r));
            assert_eq!(gen.render(r), gen.render_lines(r).join("\n"));
        }
    }

    #[test]
    fn test_custom_policy() {
        let policy = AnnotationPolicy {
            auth_tag: "Login".to_string(),
            public_path_marker: "/open/".to_string(),
            security_scheme: "jwt".to_string(),
        };
        let gen = AnnotationGenerator::new(policy);

        let auth = record(HttpMethod::Post, "/login", "login", &[], "Login");
        assert!(!gen.render(&auth).contains("status = 401"));

        let other = record(HttpMethod::Get, "/meetings", "list_meetings", &[], "Meetings");
        assert!(gen.render(&other).contains("        (\"jwt\" = []),"));

        let open = record(HttpMethod::Get, "/open/meetings", "open_meetings", &[], "Meetings");
        assert!(!gen.render(&open).contains("security("));
    }

    #[test]
    fn test_response_catalog_order() {
        let r = record(HttpMethod::Delete, "/x/{id}", "delete_x", &[], "X");
        let statuses: Vec<u16> = generator().responses(&r).iter().map(|e| e.status).collect();
        assert_eq!(statuses, vec![204, 400, 401, 403, 404, 500]);
    }
}
