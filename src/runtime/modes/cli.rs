//! One-shot commands that do not start the server

use std::path::Path;

use anyhow::{Context, Result, bail};
use colored::Colorize;

use crate::config::{StaticConfig, get_config};
use crate::i18n::{DEFAULT_LOCALE, available_languages};

/// 写出示例配置文件
pub fn generate_config(output_path: Option<&str>, force: bool) -> Result<()> {
    let path = output_path.unwrap_or("config.example.toml");
    if Path::new(path).exists() && !force {
        bail!("{} already exists, use --force to overwrite", path);
    }

    std::fs::write(path, StaticConfig::generate_sample_config())
        .with_context(|| format!("Failed to write {}", path))?;
    println!("{} Sample configuration written to {}", "✓".green().bold(), path);
    Ok(())
}

/// 列出语言包目录中的可用语言，当前语言以 `*` 标出
pub fn list_languages() -> Result<()> {
    let config = get_config();
    let dir = &config.i18n.lang_dir;
    let locales = available_languages(dir);

    if locales.is_empty() {
        println!("{} No catalogs found in {}", "ℹ".blue().bold(), dir);
        return Ok(());
    }

    let current = config.i18n.locale.as_deref().unwrap_or(DEFAULT_LOCALE);
    for locale in locales {
        if locale == current {
            println!("{} {}", "*".green().bold(), locale.green());
        } else {
            println!("  {}", locale);
        }
    }
    Ok(())
}
