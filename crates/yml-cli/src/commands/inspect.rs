// Dweve YML - Streaming catalog feed reader
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Inspect command - catalog summary

use crate::error::CliResult;
use colored::Colorize;
use yml_core::{catalog_from_file, Catalog, CatalogDate};

/// Decode the whole catalog in `file` and print a summary of its shop.
///
/// With `json`, prints the decoded catalog as pretty JSON instead.
///
/// # Errors
///
/// Returns `Err` if the file cannot be read, is malformed, or holds values
/// that do not fit the schema (such as a non-numeric currency rate).
///
/// # Examples
///
/// ```no_run
/// use yml_cli::commands::inspect;
///
/// # fn main() -> Result<(), yml_cli::CliError> {
/// inspect("feed.xml", false)?;
/// # Ok(())
/// # }
/// ```
pub fn inspect(file: &str, json: bool) -> CliResult<()> {
    let catalog = catalog_from_file(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
    } else {
        print_summary(&catalog);
    }
    Ok(())
}

fn print_summary(catalog: &Catalog) {
    let shop = &catalog.shop;

    println!("{}", "YML Catalog".bold().underline());
    println!();
    println!("{}     {}", "Date:".cyan(), format_date(&catalog.date));
    println!("{}     {}", "Shop:".cyan(), shop.name.as_deref().unwrap_or("-"));
    println!("{}  {}", "Company:".cyan(), shop.company.as_deref().unwrap_or("-"));
    println!("{}      {}", "URL:".cyan(), shop.url.as_deref().unwrap_or("-"));

    println!();
    println!("{}", "Collections:".cyan());
    let currencies: Vec<_> = shop
        .currencies
        .iter()
        .filter_map(|c| c.id.as_deref())
        .collect();
    if currencies.is_empty() {
        println!("  {}: {}", "currencies".yellow(), shop.currencies.len());
    } else {
        println!(
            "  {}: {} ({})",
            "currencies".yellow(),
            shop.currencies.len(),
            currencies.join(", ")
        );
    }
    println!("  {}: {}", "categories".yellow(), shop.categories.len());
    println!("  {}: {}", "delivery options".yellow(), shop.delivery_options.len());
    println!("  {}: {}", "offers".yellow(), shop.offers.len());
}

fn format_date(date: &CatalogDate) -> String {
    match date {
        CatalogDate::Parsed(_) => date.timestamp().format(yml_core::CATALOG_DATE_FORMAT).to_string(),
        CatalogDate::Unparsed(raw) => format!("{} {}", raw, "(unparsed)".dimmed()),
        CatalogDate::Missing => "-".dimmed().to_string(),
    }
}
