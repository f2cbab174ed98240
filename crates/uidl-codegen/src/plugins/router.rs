//! The project entry point: a router over the project's pages.

use super::{IMPORT_CHUNKS, RENDER_CHUNK, ROUTER_CHUNK};
use crate::error::{CodegenError, Result};
use crate::jsx::{Expression, JsxAttributeValue, JsxChild, JsxElement, Statement};
use crate::pipeline::{Chunk, GenerationStructure, Plugin};
use crate::targets::{REACT_ROUTER_VERSION, REACT_VERSION};
use uidl_core::Dependency;

/// One page of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry {
    /// URL path, `/` for the default page.
    pub path: String,
    pub component_name: String,
    /// Import path relative to the entry file.
    pub import_path: String,
}

/// Builds `App` as a `BrowserRouter` with one `Route` per page and renders
/// it into `#app`.
#[derive(Debug)]
pub struct ReactRouterPlugin {
    routes: Vec<RouteEntry>,
}

impl ReactRouterPlugin {
    pub fn new(routes: Vec<RouteEntry>) -> Self {
        Self { routes }
    }
}

const APP_IDENTIFIER: &str = "App";

fn router_dependency(export: &str) -> Dependency {
    let mut dependency = Dependency::package("react-router-dom", Some(REACT_ROUTER_VERSION)).named();
    dependency.meta.import_alias = Some(export.to_string());
    dependency
}

impl Plugin for ReactRouterPlugin {
    fn name(&self) -> &'static str {
        "react-router"
    }

    fn run(&self, mut structure: GenerationStructure) -> Result<GenerationStructure> {
        let table = &mut structure.dependencies;
        if !table.reserve(APP_IDENTIFIER) {
            return Err(CodegenError::NameTaken {
                name: APP_IDENTIFIER.to_string(),
            });
        }
        table.register("React", Dependency::package("react", Some(REACT_VERSION)));
        let react_dom = table.register("ReactDOM", Dependency::package("react-dom", Some(REACT_VERSION)));
        let router = table.register("Router", router_dependency("BrowserRouter"));
        let route = table.register("Route", router_dependency("Route"));

        let mut routes = JsxElement::new("div");
        for entry in &self.routes {
            let page = table.register(&entry.component_name, Dependency::local(entry.import_path.as_str()));
            let element = JsxElement::new(route.as_str())
                .with_attribute("exact", JsxAttributeValue::Flag)
                .with_attribute("path", JsxAttributeValue::String(entry.path.clone()))
                .with_attribute(
                    "component",
                    JsxAttributeValue::Expression(Expression::identifier(page)),
                )
                .self_closing();
            let id = structure.arena.alloc(element);
            routes.children.push(JsxChild::Element(id));
        }
        let routes = structure.arena.alloc(routes);
        let app = structure
            .arena
            .alloc(JsxElement::new(router).with_child(JsxChild::Element(routes)));

        let declaration = Statement::constant(
            APP_IDENTIFIER,
            Expression::arrow_block(vec![], vec![Statement::Return(Expression::Jsx(app))]),
        );
        structure.push_chunk(Chunk::ast(ROUTER_CHUNK, vec![declaration]).link_after(&IMPORT_CHUNKS));

        let app_element = structure.arena.alloc(JsxElement::new(APP_IDENTIFIER).self_closing());
        let render = Expression::call(
            Expression::member(Expression::identifier(react_dom), "render"),
            vec![
                Expression::Jsx(app_element),
                Expression::call(
                    Expression::path("document.getElementById"),
                    vec![Expression::String("app".into())],
                ),
            ],
        );
        structure.push_chunk(
            Chunk::ast(RENDER_CHUNK, vec![Statement::Expression(render)]).link_after(&[ROUTER_CHUNK]),
        );

        Ok(structure)
    }
}
