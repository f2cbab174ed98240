//! Project generation: pages, components, entry point and scaffolding.

use super::templates::INDEX_HTML_TEMPLATE;
use super::{CompiledComponent, ComponentGenerator, GeneratedFile, GeneratedProject, GeneratorOptions, TemplateEngine};
use crate::dependencies::DependencyTable;
use crate::error::{CodegenError, Result};
use crate::pipeline::{run_pipeline, FileType, GenerationStructure, Plugin, StructureOptions};
use crate::plugins::{
    component_file_name, component_name, kebab_name, ImportStatementsPlugin, ReactRouterPlugin, RouteEntry,
};
use handlebars::html_escape;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, instrument};
use uidl_core::{
    ComponentUidl, ElementNode, PageOptions, ProjectUidl, ReferenceType, UidlNode, ROUTE_STATE,
};
use uidl_resolver::resolve_project;

pub const VIEWS_DIR: &str = "src/views";
pub const COMPONENTS_DIR: &str = "src/components";
pub const ENTRY_FILE: &str = "src/index";

const REACT_SCRIPTS_VERSION: &str = "^4.0.3";

/// `package.json` of a generated project.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageManifest {
    name: String,
    version: &'static str,
    private: bool,
    scripts: IndexMap<&'static str, &'static str>,
    dependencies: IndexMap<String, String>,
    dev_dependencies: IndexMap<&'static str, &'static str>,
}

/// One component to compile into `dir`.
struct Job {
    uidl: ComponentUidl,
    dir: &'static str,
    file_name: String,
}

/// Generates a runnable React project with one route per page.
pub struct ProjectGenerator {
    components: ComponentGenerator,
    templates: TemplateEngine<'static>,
}

impl ProjectGenerator {
    /// Fails for component types without a JSX runtime, since the router
    /// and entry module are JSX.
    pub fn new(options: GeneratorOptions) -> Result<Self> {
        if options.component_type.jsx_runtime().is_none() {
            return Err(CodegenError::InvalidSelector {
                kind: "project component type",
                value: options.component_type.to_string(),
            });
        }
        let options = GeneratorOptions {
            file_name: None,
            ..options
        };
        Ok(Self {
            components: ComponentGenerator::new(options),
            templates: TemplateEngine::with_project_templates()?,
        })
    }

    pub fn generate_project(&self, uidl: &ProjectUidl) -> Result<GeneratedProject> {
        self.generate_project_with_cancel(uidl, &AtomicBool::new(false))
    }

    /// Generate a project, giving up with [`CodegenError::Cancelled`] once
    /// `cancel` is set. The flag is checked before each component is compiled.
    #[instrument(skip_all, fields(project = %uidl.name))]
    pub fn generate_project_with_cancel(
        &self,
        uidl: &ProjectUidl,
        cancel: &AtomicBool,
    ) -> Result<GeneratedProject> {
        resolve_project(uidl)?;

        let pages = extract_pages(&uidl.root);
        let routes: Vec<RouteEntry> = pages
            .iter()
            .map(|page| RouteEntry {
                path: page.path.clone(),
                component_name: component_name(&page.job.uidl),
                import_path: format!("./views/{}", page.job.file_name),
            })
            .collect();

        let mut jobs: Vec<Job> = pages.into_iter().map(|page| page.job).collect();
        jobs.extend(uidl.components.iter().map(|component| Job {
            uidl: component.clone(),
            dir: COMPONENTS_DIR,
            file_name: component_file_name(component),
        }));
        debug!(pages = routes.len(), components = uidl.components.len(), "Compiling project");

        let compiled = self.compile_all(&jobs, cancel)?;

        let mut files = Vec::new();
        let mut dependencies = DependencyTable::new();
        for (job, component) in jobs.iter().zip(compiled) {
            dependencies.merge(&component.dependencies);
            files.extend(component.files.into_iter().map(|file| GeneratedFile {
                path: format!("{}/{}", job.dir, file.path),
                ..file
            }));
        }

        let entry = self.generate_entry(&uidl.root, routes)?;
        dependencies.merge(&entry.dependencies);
        files.extend(entry.files);

        files.push(self.package_json(uidl, &dependencies)?);
        files.push(self.index_html(uidl)?);

        Ok(GeneratedProject {
            name: uidl.name.clone(),
            files,
            dependencies,
        })
    }

    fn compile_all(&self, jobs: &[Job], cancel: &AtomicBool) -> Result<Vec<CompiledComponent>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            return jobs.par_iter().map(|job| self.compile_job(job, cancel)).collect();
        }
        #[cfg(not(feature = "parallel"))]
        jobs.iter().map(|job| self.compile_job(job, cancel)).collect()
    }

    fn compile_job(&self, job: &Job, cancel: &AtomicBool) -> Result<CompiledComponent> {
        if cancel.load(Ordering::Relaxed) {
            return Err(CodegenError::Cancelled);
        }
        debug!(component = %job.uidl.name, dir = job.dir, "Compiling component");
        self.components.compile(job.uidl.clone(), &job.file_name)
    }

    /// `src/index.js`: the router over the pages, rendered into `#app`.
    fn generate_entry(&self, root: &ComponentUidl, routes: Vec<RouteEntry>) -> Result<CompiledComponent> {
        let plugins: Vec<Box<dyn Plugin>> = vec![
            Box::new(ReactRouterPlugin::new(routes)),
            Box::new(ImportStatementsPlugin::new()),
        ];
        let structure = GenerationStructure::new(
            root.clone(),
            StructureOptions {
                file_name: "index".to_string(),
            },
        );
        let structure = run_pipeline(structure, &plugins)?;
        Ok(CompiledComponent {
            files: self
                .components
                .emit_files(&structure.chunks, &structure.arena, ENTRY_FILE),
            dependencies: structure.dependencies,
        })
    }

    fn package_json(&self, uidl: &ProjectUidl, dependencies: &DependencyTable) -> Result<GeneratedFile> {
        let manifest = PackageManifest {
            name: kebab_name(&uidl.name),
            version: "1.0.0",
            private: true,
            scripts: IndexMap::from([("start", "react-scripts start"), ("build", "react-scripts build")]),
            dependencies: dependencies.package_versions(),
            dev_dependencies: IndexMap::from([("react-scripts", REACT_SCRIPTS_VERSION)]),
        };
        let mut content = serde_json::to_string_pretty(&manifest)?;
        content.push('\n');
        Ok(GeneratedFile {
            path: "package.json".to_string(),
            content,
            file_type: FileType::Json,
        })
    }

    fn index_html(&self, uidl: &ProjectUidl) -> Result<GeneratedFile> {
        let globals = &uidl.globals;
        let title = if globals.title.is_empty() {
            &uidl.name
        } else {
            &globals.title
        };
        let meta: Vec<_> = globals
            .meta
            .iter()
            .map(|tag| json!({"name": html_escape(&tag.name), "content": html_escape(&tag.content)}))
            .collect();
        let content = self.templates.render(
            INDEX_HTML_TEMPLATE,
            &json!({
                "title": html_escape(title),
                "language": html_escape(globals.language.as_deref().unwrap_or("en")),
                "meta": meta,
            }),
        )?;
        Ok(GeneratedFile {
            path: "public/index.html".to_string(),
            content,
            file_type: FileType::Html,
        })
    }
}

struct Page {
    path: String,
    job: Job,
}

/// Pages are the root's conditionals on the `route` state, either the root
/// itself or its direct children. A root without any is a single page.
fn extract_pages(root: &ComponentUidl) -> Vec<Page> {
    let candidates: Vec<&UidlNode> = match &root.node {
        UidlNode::Element(element) => element.children.iter().collect(),
        node => vec![node],
    };

    let mut pages: Vec<Page> = candidates
        .into_iter()
        .filter_map(|node| match node {
            UidlNode::Conditional(conditional)
                if conditional.reference.reference_type == ReferenceType::State
                    && conditional.reference.id == ROUTE_STATE =>
            {
                let value = conditional.value.as_ref()?.to_text();
                Some(route_page(root, &value, &conditional.node))
            }
            _ => None,
        })
        .collect();

    if pages.is_empty() {
        let uidl = root.clone();
        let file_name = component_file_name(&uidl);
        pages.push(Page {
            path: "/".to_string(),
            job: Job {
                uidl,
                dir: VIEWS_DIR,
                file_name,
            },
        });
    }
    pages
}

fn route_page(root: &ComponentUidl, value: &str, node: &UidlNode) -> Page {
    let route = root.state_definitions.get(ROUTE_STATE);
    let options = route
        .and_then(|state| state.values.iter().find(|details| details.value == value))
        .and_then(|details| details.page_options.clone())
        .unwrap_or_default();
    let is_default = route.is_some_and(|state| state.default_value.to_text() == value);

    let PageOptions {
        component_name,
        nav_link,
        file_name,
    } = options;

    let node = if node.is_renderable_root() {
        node.clone()
    } else {
        UidlNode::Element(ElementNode::new("div").with_child(node.clone()))
    };
    let mut uidl = ComponentUidl::new(component_name.unwrap_or_else(|| value.to_string()), node);
    uidl.prop_definitions = root.prop_definitions.clone();
    uidl.design_tokens = root.design_tokens.clone();
    uidl.state_definitions = root
        .state_definitions
        .iter()
        .filter(|(name, _)| name.as_str() != ROUTE_STATE)
        .map(|(name, state)| (name.clone(), state.clone()))
        .collect();

    let file_name = file_name.unwrap_or_else(|| component_file_name(&uidl));
    let path = match nav_link {
        Some(link) => link,
        None if is_default => "/".to_string(),
        None => format!("/{file_name}"),
    };

    Page {
        path,
        job: Job {
            uidl,
            dir: VIEWS_DIR,
            file_name,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uidl_core::builders::{component, conditional, element, static_node};
    use uidl_core::{
        Dependency, DynamicReference, PropType, ProjectGlobals, StateDefinition, StateValueDetails,
        StaticValue,
    };

    fn route_state() -> StateDefinition {
        let mut state = StateDefinition::new(PropType::String, "home");
        state.values = vec![
            StateValueDetails {
                value: "home".into(),
                page_options: None,
            },
            StateValueDetails {
                value: "about".into(),
                page_options: Some(PageOptions {
                    component_name: Some("AboutUs".into()),
                    nav_link: Some("/about-us".into()),
                    file_name: None,
                }),
            },
        ];
        state
    }

    fn project() -> ProjectUidl {
        let card = ElementNode::new("Card").with_dependency(Dependency::local("../components/card"));
        let root = component(
            "App",
            element(
                "div",
                vec![
                    conditional(
                        element("main", vec![UidlNode::Element(card)]),
                        DynamicReference::state(ROUTE_STATE),
                        StaticValue::from("home"),
                    ),
                    conditional(
                        static_node("About"),
                        DynamicReference::state(ROUTE_STATE),
                        StaticValue::from("about"),
                    ),
                ],
            ),
        )
        .with_state(ROUTE_STATE, route_state());

        ProjectUidl {
            name: "my shop".into(),
            globals: ProjectGlobals {
                title: "My <Shop>".into(),
                ..ProjectGlobals::default()
            },
            root,
            components: vec![component("Card", element("div", vec![static_node("card")]))],
        }
    }

    #[test]
    fn test_extract_pages() {
        let pages = extract_pages(&project().root);
        assert_eq!(pages.len(), 2);

        assert_eq!(pages[0].path, "/");
        assert_eq!(pages[0].job.uidl.name, "home");
        assert_eq!(pages[0].job.file_name, "home");
        assert!(pages[0].job.uidl.state_definitions.is_empty());

        assert_eq!(pages[1].path, "/about-us");
        assert_eq!(pages[1].job.uidl.name, "AboutUs");
        assert_eq!(pages[1].job.file_name, "about-us");
        assert!(matches!(&pages[1].job.uidl.node, UidlNode::Element(div) if div.element_type == "div"));
    }

    #[test]
    fn test_root_without_routes_is_one_page() {
        let root = component("Landing", element("div", vec![]));
        let pages = extract_pages(&root);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].path, "/");
        assert_eq!(pages[0].job.file_name, "landing");
    }

    #[test]
    fn test_generate_project_files() {
        let generator = ProjectGenerator::new(GeneratorOptions::default()).unwrap();
        let project = generator.generate_project(&project()).unwrap();

        let paths: Vec<_> = project.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "src/views/home.js",
                "src/views/about-us.js",
                "src/components/card.js",
                "src/index.js",
                "package.json",
                "public/index.html",
            ]
        );

        let entry = &project.file("src/index.js").unwrap().content;
        assert!(entry.contains("import Home from './views/home';"));
        assert!(entry.contains("<Route exact path=\"/about-us\" component={AboutUs} />"));
        assert!(entry.contains("ReactDOM.render(<App />, document.getElementById('app'));"));

        let package: serde_json::Value =
            serde_json::from_str(&project.file("package.json").unwrap().content).unwrap();
        assert_eq!(package["name"], "my-shop");
        assert_eq!(package["dependencies"]["react"], "^17.0.2");
        assert_eq!(package["dependencies"]["react-router-dom"], "^5.2.0");

        let html = &project.file("public/index.html").unwrap().content;
        assert!(html.contains("<title>My &lt;Shop&gt;</title>"));
    }

    #[test]
    fn test_single_page_app_root_keeps_entry_bindings_distinct() {
        let uidl = ProjectUidl {
            name: "Hello".into(),
            globals: ProjectGlobals::default(),
            root: component("App", element("div", vec![static_node("Hello")])),
            components: Vec::new(),
        };
        let generator = ProjectGenerator::new(GeneratorOptions::default()).unwrap();
        let project = generator.generate_project(&uidl).unwrap();

        let view = &project.file("src/views/app.js").unwrap().content;
        assert!(view.contains("const App = (props) => {"));

        let entry = &project.file("src/index.js").unwrap().content;
        assert!(entry.contains("import ViewsAppApp from './views/app';"));
        assert!(entry.contains("<Route exact path=\"/\" component={ViewsAppApp} />"));
        assert_eq!(entry.matches("App = ").count(), 1);
        assert!(!entry.contains("import App "));
    }

    #[test]
    fn test_package_json_escapes_dependency_versions() {
        let mut uidl = project();
        let picker = ElementNode::new("Picker")
            .with_dependency(Dependency::package("ui-kit", Some(r#"^1.0.0" \ beta"#)));
        let card = ElementNode::new("div").with_child(UidlNode::Element(picker));
        uidl.components = vec![component("Card", UidlNode::Element(card))];

        let generator = ProjectGenerator::new(GeneratorOptions::default()).unwrap();
        let project = generator.generate_project(&uidl).unwrap();
        let content = &project.file("package.json").unwrap().content;

        let package: serde_json::Value = serde_json::from_str(content).unwrap();
        assert_eq!(package["dependencies"]["ui-kit"], r#"^1.0.0" \ beta"#);
        assert_eq!(package["devDependencies"]["react-scripts"], "^4.0.3");
        assert!(content.starts_with("{\n  \"name\": \"my-shop\",\n  \"version\": \"1.0.0\","));
    }

    #[cfg(feature = "vue")]
    #[test]
    fn test_vue_projects_are_rejected() {
        let result = ProjectGenerator::new(GeneratorOptions {
            component_type: crate::targets::ComponentType::Vue,
            ..GeneratorOptions::default()
        });
        assert!(matches!(
            result,
            Err(CodegenError::InvalidSelector { kind: "project component type", ref value }) if value == "vue"
        ));
    }

    #[test]
    fn test_cancelled_before_compiling() {
        let generator = ProjectGenerator::new(GeneratorOptions::default()).unwrap();
        let cancel = AtomicBool::new(true);
        assert!(matches!(
            generator.generate_project_with_cancel(&project(), &cancel),
            Err(CodegenError::Cancelled)
        ));
    }
}
