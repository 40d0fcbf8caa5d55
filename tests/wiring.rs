use std::sync::Arc;

use wirebox::{registry, Container, Injectable, InjectionPoint, InstantiateErrorKind};

trait SettingsSource: Send + Sync {
    fn raw(&self) -> &'static str;
}

trait SettingsParser: Send + Sync {
    fn keys(&self) -> usize;
}

trait Application: Send + Sync {
    fn boot(&self) -> usize;
}

struct StaticSource;

impl SettingsSource for StaticSource {
    fn raw(&self) -> &'static str {
        "host=localhost\nport=5432"
    }
}

impl Injectable for StaticSource {
    fn construct() -> Result<Self, InstantiateErrorKind> {
        Ok(Self)
    }
}

struct LineParser {
    source: Option<Arc<dyn SettingsSource>>,
}

impl SettingsParser for LineParser {
    fn keys(&self) -> usize {
        self.source.as_ref().map_or(0, |source| source.raw().lines().count())
    }
}

impl Injectable for LineParser {
    fn construct() -> Result<Self, InstantiateErrorKind> {
        Ok(Self { source: None })
    }

    fn injection_points() -> Vec<InjectionPoint> {
        vec![InjectionPoint::new("source", |parser: &mut Self, source: Arc<dyn SettingsSource>| {
            parser.source = Some(source);
        })]
    }
}

struct App {
    parser: Option<Arc<dyn SettingsParser>>,
}

impl Application for App {
    fn boot(&self) -> usize {
        self.parser.as_ref().map_or(0, |parser| parser.keys())
    }
}

impl Injectable for App {
    fn construct() -> Result<Self, InstantiateErrorKind> {
        Ok(Self { parser: None })
    }

    fn injection_points() -> Vec<InjectionPoint> {
        vec![InjectionPoint::new("parser", |app: &mut Self, parser: Arc<dyn SettingsParser>| {
            app.parser = Some(parser);
        })]
    }
}

fn container() -> Container {
    Container::new(registry! {
        dyn SettingsSource => StaticSource,
        dyn SettingsParser => LineParser,
        dyn Application => App,
    })
}

#[test]
fn test_resolves_wired_graph() {
    let container = container();

    let app = container.resolve::<dyn Application>().unwrap();

    assert_eq!(app.boot(), 2);
}

#[test]
fn test_repeated_resolutions_share_instances() {
    let container = container();

    let app = container.resolve::<dyn Application>().unwrap();
    let parser = container.resolve::<dyn SettingsParser>().unwrap();
    let again = container.resolve::<dyn SettingsParser>().unwrap();
    let concrete = container.resolve::<LineParser>().unwrap();

    assert!(Arc::ptr_eq(&parser, &again));
    assert!(std::ptr::eq(
        Arc::as_ptr(&parser) as *const (),
        Arc::as_ptr(&concrete) as *const ()
    ));
    assert_eq!(app.boot(), concrete.keys());
}
