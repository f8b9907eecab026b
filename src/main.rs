//! Position Tags CLI
//!
//! Usage:
//!   position-tags [OPTIONS] --content <FILE> [TEMPLATE]
//!
//! Renders a template file (or stdin) against a TOML content fixture file.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;

use position_tags::{parse, Context, FixtureStore, Renderer};

#[derive(Parser)]
#[command(name = "position-tags")]
#[command(about = "Render templates with editorial position directives")]
struct Cli {
    /// Template file (reads from stdin if not provided)
    template: Option<PathBuf>,

    /// Content fixture file (TOML: site, categories, positions)
    #[arg(short, long, required_unless_present = "grammar")]
    content: Option<PathBuf>,

    /// Site to resolve categories against (defaults to the content file's site)
    #[arg(short, long)]
    site: Option<String>,

    /// Context variable binding, repeatable (NAME=VALUE)
    #[arg(long = "var", value_parser = parse_binding)]
    vars: Vec<(String, String)>,

    /// Show directive syntax reference
    #[arg(short, long)]
    grammar: bool,
}

fn parse_binding(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{}'", s)),
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.grammar {
        print_grammar();
        return;
    }

    let content_path = cli.content.expect("clap enforces --content");
    let store = match FixtureStore::from_file(&content_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error loading content '{}': {}", content_path.display(), e);
            std::process::exit(1);
        }
    };
    let site = cli.site.unwrap_or_else(|| store.site().to_string());

    let (source, filename) = match &cli.template {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let template = match parse(&source) {
        Ok(template) => template,
        Err(e) => {
            eprint!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    };

    let mut ctx = Context::new();
    for (name, value) in cli.vars {
        ctx.insert(name, value);
    }

    println!("{}", Renderer::new(&store, &site).render(&template, &mut ctx));
}

fn print_grammar() {
    println!(
        r#"POSITION DIRECTIVES
===================

{{% position POSITION_NAME for CATEGORY [using BOX_TYPE] [nofallback] %}}
    ...body...
{{% endposition %}}

{{% ifposition POSITION_NAME for CATEGORY [using BOX_TYPE] [nofallback] %}}
    ...rendered when the position resolves...
{{% else %}}
    ...rendered otherwise (optional)...
{{% endifposition %}}

CATEGORY is a quoted slug literal ("news") or a context variable holding a
category object; unresolvable categories render as empty output. Without
`nofallback`, resolution walks up the category tree until an active,
inheritable assignment is found.

{{{{ variable.path }}}}
    Interpolates a context value; unresolvable paths render as empty text.

CONTENT FILE (TOML)
===================

site = "example.com"

[[categories]]
slug = "news"
parent = "frontpage"      # optional

[[positions]]
category = "news"
name = "top_left"
active = true             # default true
inherit = true            # default true; participates in ancestor fallback
markup = "<b>HELLO</b>"   # or: object = {{ title = "...", url = "..." }}"#
    );
}
