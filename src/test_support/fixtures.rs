//! Description-file fixtures.

/// Builder for the TOML text of a description file.
#[derive(Debug, Clone, Default)]
pub struct BuildFileFixture {
    path: Option<String>,
    statements: Vec<String>,
}

fn toml_list(items: &[&str]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| format!("{:?}", s)).collect();
    format!("[{}]", quoted.join(", "))
}

impl BuildFileFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `path` key.
    pub fn path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    /// Append a declaration.
    pub fn declare(mut self, item_type: &str, name: &str, sources: &[&str], outputs: &[&str]) -> Self {
        self.statements.push(format!(
            "[[statement]]\nop = \"declare\"\ntype = \"{}\"\nname = \"{}\"\nsources = {}\noutputs = {}\n",
            item_type,
            name,
            toml_list(sources),
            toml_list(outputs)
        ));
        self
    }

    /// Append a call whose arguments are all strings.
    pub fn call(mut self, function: &str, args: &[&str]) -> Self {
        self.statements.push(format!(
            "[[statement]]\nop = \"call\"\nfunction = \"{}\"\nargs = {}\n",
            function,
            toml_list(args)
        ));
        self
    }

    pub fn to_toml(&self) -> String {
        let mut out = String::new();
        if let Some(ref path) = self.path {
            out.push_str(&format!("path = \"{}\"\n\n", path));
        }
        out.push_str(&self.statements.join("\n"));
        out
    }
}
