use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::handlers::posts::{CreatePostDto, PostDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http_handlers::health_handler,
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::create_post
    ),
    components(
        schemas(
            CreatePostDto,
            PostDto
        )
    ),
    tags(
        (name = "health", description = "Reachability probe"),
        (name = "blog", description = "Blog post endpoints")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
