//! Path-pattern router: [`Router`], [`RouteMatch`].
//!
//! Patterns are slash-separated segments; a segment written `:name`
//! captures the corresponding path segment into `params`. Anything after
//! `?` is parsed as `key=value` pairs into `query`. Routes are tried in
//! registration order; the first full-length match wins. Driving this
//! from host navigation events is backend-specific and out of scope here.

use std::collections::HashMap;
use std::rc::Rc;

// ---------------------------------------------------------------------------
// RouteMatch
// ---------------------------------------------------------------------------

/// The result of resolving a path against a registered pattern.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteMatch {
    /// The pattern that matched.
    pub pattern: String,
    /// `:name` segment captures.
    pub params: HashMap<String, String>,
    /// Query-string pairs.
    pub query: HashMap<String, String>,
}

/// Callback invoked for a matched route.
#[derive(Clone)]
pub struct RouteHandler(Rc<dyn Fn(&RouteMatch)>);

impl RouteHandler {
    /// Wrap a callback.
    pub fn new(f: impl Fn(&RouteMatch) + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Invoke the callback.
    pub fn call(&self, m: &RouteMatch) {
        (self.0)(m)
    }
}

impl std::fmt::Debug for RouteHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RouteHandler(<fn>)")
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

#[derive(Debug)]
enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Debug)]
struct Route {
    pattern: String,
    segments: Vec<Segment>,
    handler: RouteHandler,
}

/// Ordered route table.
#[derive(Debug, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route (builder). Routes are tried in registration order.
    pub fn route(mut self, pattern: &str, handler: impl Fn(&RouteMatch) + 'static) -> Self {
        self.add(pattern, handler);
        self
    }

    /// Register a route.
    pub fn add(&mut self, pattern: &str, handler: impl Fn(&RouteMatch) + 'static) {
        let segments = split_segments(pattern)
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_owned()),
                None => Segment::Literal(s.to_owned()),
            })
            .collect();
        self.routes.push(Route {
            pattern: pattern.to_owned(),
            segments,
            handler: RouteHandler::new(handler),
        });
    }

    /// Resolve a path (optionally carrying a query string) against the
    /// route table. Returns the match plus its handler, or `None`.
    pub fn resolve(&self, path: &str) -> Option<(RouteHandler, RouteMatch)> {
        let (path_part, query_part) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };
        let segments: Vec<&str> = split_segments(path_part).collect();

        for route in &self.routes {
            if let Some(params) = match_segments(&route.segments, &segments) {
                let m = RouteMatch {
                    pattern: route.pattern.clone(),
                    params,
                    query: query_part.map(parse_query).unwrap_or_default(),
                };
                return Some((route.handler.clone(), m));
            }
        }
        None
    }

    /// Resolve and invoke the matched handler. Returns whether a route
    /// matched.
    pub fn dispatch(&self, path: &str) -> bool {
        match self.resolve(path) {
            Some((handler, m)) => {
                handler.call(&m);
                true
            }
            None => false,
        }
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn match_segments(pattern: &[Segment], path: &[&str]) -> Option<HashMap<String, String>> {
    if pattern.len() != path.len() {
        return None;
    }
    let mut params = HashMap::new();
    for (seg, &actual) in pattern.iter().zip(path) {
        match seg {
            Segment::Literal(expected) => {
                if expected != actual {
                    return None;
                }
            }
            Segment::Param(name) => {
                params.insert(name.clone(), actual.to_owned());
            }
        }
    }
    Some(params)
}

fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (k.to_owned(), v.to_owned()),
            None => (pair.to_owned(), String::new()),
        })
        .collect()
}

// ===========================================================================
// Tests
// ===========================================================================
