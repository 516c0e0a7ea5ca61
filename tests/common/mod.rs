#![allow(dead_code)]

/// Route table shared by the integration tests
pub const ROUTES_YAML: &str = r#"
hello:
  path: /foo/hello/{name}/{surname}
  method: [GET]
  controller: app.HelloController
world:
  path: /foo/world/{name}/{number}
  methods: [GET, POST]
  controller: app.WorldController
  action: world_action
  requirements:
    name: '\w+'
    number: '\d+'
  protocols: [HTTP, HTTPS]
  host: foo.com
nodeps:
  path: /x/nodeps/{id}
  controller: app.NodepsController
"#;

pub mod temp_files {
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Fresh directory holding one route file named `name`
    ///
    /// Keep the returned `TempDir` alive for as long as the file is used.
    pub fn create_routes_file(name: &str, content: &str) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    pub fn create_temp_yaml(content: &str) -> (TempDir, PathBuf) {
        create_routes_file("routes.yaml", content)
    }
}
