use std::path::Path;

use anyhow::{anyhow, Context};
use colored::Colorize;
use serde_json::{json, Value as Json};

use onerecord_codec::projection::map_to_json;
use onerecord_codec::{encode, project_properties, Decoder};
use onerecord_diff::diff_entities;
use onerecord_ontology::{cargo_ontology, OntologyConfig, OntologyRegistry};
use onerecord_patch::{generate_patch_request, OpCode, PatchRequest};
use onerecord_types::vocab::cargo_property;
use onerecord_types::Entity;

use crate::cli::*;
use crate::config::CliConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    let registry = load_registry(cli.ontology.as_deref().or(config.ontology.as_deref()))?;

    match cli.command {
        Command::Decode(args) => cmd_decode(&registry, &config, &cli.format, args),
        Command::Project(args) => cmd_project(&registry, &config, &cli.format, args),
        Command::Diff(args) => cmd_diff(&registry, &config, &cli.format, args),
        Command::Types(args) => cmd_types(&registry, &cli.format, args),
    }
}

fn load_registry(ontology: Option<&Path>) -> anyhow::Result<OntologyRegistry> {
    match ontology {
        Some(path) => OntologyConfig::load(path)
            .and_then(OntologyConfig::into_registry)
            .with_context(|| format!("loading ontology {}", path.display())),
        None => Ok(cargo_ontology()),
    }
}

fn read_document(path: &Path) -> anyhow::Result<Json> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn decode_file(decoder: &Decoder<'_>, path: &Path) -> anyhow::Result<Entity> {
    let document = read_document(path)?;
    decoder
        .decode_strict(&document)
        .with_context(|| format!("decoding {}", path.display()))
}

fn print_json(value: &Json) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn variant_name<'r>(registry: &'r OntologyRegistry, entity: &Entity) -> &'r str {
    registry
        .resolve_variant(entity.types())
        .map(|v| v.name())
        .unwrap_or("?")
}

fn cmd_decode(
    registry: &OntologyRegistry,
    config: &CliConfig,
    format: &OutputFormat,
    args: DecodeArgs,
) -> anyhow::Result<()> {
    let decoder = Decoder::with_config(registry, config.decoder.clone());
    let entities = if args.many {
        let document = read_document(&args.file)?;
        let documents = match document {
            Json::Array(items) => items,
            single => vec![single],
        };
        decoder.decode_many(&documents)
    } else {
        vec![decode_file(&decoder, &args.file)?]
    };

    match format {
        OutputFormat::Json => {
            let encoded: Vec<Json> = entities.iter().map(encode).collect();
            print_json(&if args.many { Json::Array(encoded) } else { encoded.into_iter().next().unwrap_or(Json::Null) })
        }
        OutputFormat::Text => {
            for entity in &entities {
                println!(
                    "{} {} {}",
                    "✓".green().bold(),
                    variant_name(registry, entity).yellow().bold(),
                    entity.identity().unwrap_or("(no identity)").cyan()
                );
                for (predicate, value) in entity.properties() {
                    println!("  {} ({})", predicate, value.category().dimmed());
                }
            }
            if args.many {
                println!("{} document(s) decoded", entities.len().to_string().bold());
            }
            Ok(())
        }
    }
}

fn cmd_project(
    registry: &OntologyRegistry,
    config: &CliConfig,
    format: &OutputFormat,
    args: ProjectArgs,
) -> anyhow::Result<()> {
    let decoder = Decoder::with_config(registry, config.decoder.clone());
    let entity = decode_file(&decoder, &args.file)?;
    let projection = project_properties(&entity);

    match format {
        OutputFormat::Json => print_json(&map_to_json(&projection)),
        OutputFormat::Text => {
            for (predicate, value) in &projection {
                println!("{} = {}", predicate.bold(), value.to_json());
            }
            Ok(())
        }
    }
}

fn cmd_diff(
    registry: &OntologyRegistry,
    config: &CliConfig,
    format: &OutputFormat,
    args: DiffArgs,
) -> anyhow::Result<()> {
    let decoder = Decoder::with_config(registry, config.decoder.clone());
    let before = decode_file(&decoder, &args.before)?;
    let after = decode_file(&decoder, &args.after)?;

    let requestor = args
        .requestor
        .or_else(|| config.requestor.clone())
        .ok_or_else(|| anyhow!("no requestor: pass --requestor or set `requestor` in the config file"))?;

    let mut request = generate_patch_request(registry, &before, &after, requestor)
        .context("generating patch request")?;
    let has_revision = before.contains(&cargo_property("LogisticsObject", "revision"));
    if let Some(revision) = args.revision {
        request.revision = revision;
    } else if let (false, Some(revision)) = (has_revision, &config.default_revision) {
        request.revision = revision.clone();
    }
    if let Some(description) = args.description {
        request = request.with_description(description);
    }

    match format {
        OutputFormat::Json if args.jsonld => print_json(&request.to_jsonld()),
        OutputFormat::Json => print_json(&serde_json::to_value(&request)?),
        OutputFormat::Text => {
            print_request(&request);
            let diff = diff_entities(&before, &after);
            println!(
                "{} replaced, {} added, {} deleted",
                diff.replacements().to_string().bold(),
                (diff.additions() - diff.replacements()).to_string().green(),
                (diff.deletions() - diff.replacements()).to_string().red()
            );
            Ok(())
        }
    }
}

fn print_request(request: &PatchRequest) {
    println!(
        "Patch for {} (revision {}, requestor {})",
        request.target.to_string().yellow().bold(),
        request.revision.bold(),
        request.requestor.cyan()
    );
    if let Some(description) = &request.description {
        println!("  {}", description.italic());
    }
    for op in &request.operations {
        let code = match op.op {
            OpCode::Del => op.op.as_str().red().bold(),
            OpCode::Add => op.op.as_str().green().bold(),
        };
        println!("  {} {}", code, op.predicate);
        println!("      {} {}", op.value.datatype.dimmed(), op.value.value);
    }
}

fn cmd_types(registry: &OntologyRegistry, format: &OutputFormat, args: TypesArgs) -> anyhow::Result<()> {
    let variants: Vec<_> = registry
        .variants()
        .filter(|v| args.all || !v.is_abstract())
        .collect();

    match format {
        OutputFormat::Json => {
            let listed: Vec<Json> = variants
                .iter()
                .map(|v| {
                    json!({
                        "type": v.type_id(),
                        "name": v.name(),
                        "abstract": v.is_abstract(),
                        "ancestors": v.ancestors(),
                        "fields": v.len(),
                    })
                })
                .collect();
            print_json(&Json::Array(listed))
        }
        OutputFormat::Text => {
            for v in variants {
                let name = if v.is_abstract() { v.name().dimmed() } else { v.name().yellow() };
                println!("{:<20} {:>3} fields  {}", name, v.len(), v.type_id().dimmed());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;

    fn piece_file(dir: &tempfile::TempDir, name: &str, weight: f64) -> PathBuf {
        let path = dir.path().join(name);
        let doc = json!({
            "@id": "http://localhost:8080/los/piece-1",
            "@type": ["https://onerecord.iata.org/Piece", "https://onerecord.iata.org/LogisticsObject"],
            "https://onerecord.iata.org/LogisticsObject#companyIdentifier": "test",
            "https://onerecord.iata.org/Piece#goodsDescription": "six pack of Koelsch beer",
            "https://onerecord.iata.org/Piece#grossWeight": {
                "@type": "https://onerecord.iata.org/Value",
                "https://onerecord.iata.org/Value#value": weight
            }
        });
        std::fs::write(&path, doc.to_string()).unwrap();
        path
    }

    #[test]
    fn builtin_registry_without_ontology_file() {
        let registry = load_registry(None).unwrap();
        assert!(registry.contains("https://onerecord.iata.org/Piece"));
    }

    #[test]
    fn ontology_file_extends_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[[variants]]\ntype_id = \"https://example.org/Crate\"\nname = \"Crate\"\nparent = \"https://onerecord.iata.org/Piece\""
        )
        .unwrap();
        let registry = load_registry(Some(file.path())).unwrap();
        assert!(registry.contains("https://example.org/Crate"));
        assert!(registry.contains("https://onerecord.iata.org/Piece"));
    }

    #[test]
    fn diff_needs_a_requestor() {
        let dir = tempfile::tempdir().unwrap();
        let registry = cargo_ontology();
        let args = DiffArgs {
            before: piece_file(&dir, "a.json", 3.922),
            after: piece_file(&dir, "b.json", 4.0),
            requestor: None,
            revision: None,
            description: None,
            jsonld: false,
        };
        let err = cmd_diff(&registry, &CliConfig::default(), &OutputFormat::Text, args).unwrap_err();
        assert!(err.to_string().contains("requestor"));
    }

    #[test]
    fn commands_run_on_files() {
        let dir = tempfile::tempdir().unwrap();
        let registry = cargo_ontology();
        let config = CliConfig::default();
        let before = piece_file(&dir, "a.json", 3.922);
        let after = piece_file(&dir, "b.json", 4.0);

        cmd_decode(&registry, &config, &OutputFormat::Json, DecodeArgs { file: before.clone(), many: true }).unwrap();
        cmd_project(&registry, &config, &OutputFormat::Text, ProjectArgs { file: before.clone() }).unwrap();
        cmd_types(&registry, &OutputFormat::Text, TypesArgs { all: true }).unwrap();
        cmd_diff(
            &registry,
            &config,
            &OutputFormat::Json,
            DiffArgs {
                before,
                after,
                requestor: Some("cgnbeerbrewery".into()),
                revision: Some("2".into()),
                description: None,
                jsonld: true,
            },
        )
        .unwrap();
    }
}
