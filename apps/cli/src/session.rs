//! # Interactive Session Loop
//!
//! Menu-driven orchestration over the store and the core validators.
//!
//! ## Flow Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            MAIN MENU                                    │
//! │                                                                         │
//! │   N ──► add product ─────► prompts ──► duplicate check ──► confirm     │
//! │   V ──► view by ID ──────► detail ──► e) edit  d) delete  q) back      │
//! │   A ──► analysis report ─► pause                                        │
//! │   B ──► backup CSV                                                      │
//! │   L ──► product listing ─► pause                                        │
//! │   R ──► brand listing ───► pause                                        │
//! │   Q ──► goodbye                                                         │
//! │                                                                         │
//! │  Every prompt loops until the input validates; validation errors are   │
//! │  printed and never fatal. End of input at the main menu quits; end of  │
//! │  input inside a flow abandons that flow.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Headless by Construction
//! The session reads from any [`BufRead`] and writes to any [`Write`], so
//! tests drive the exact production code paths with scripted input and a
//! captured output buffer. `main` hands it locked stdin/stdout.

use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::Utc;
use tracing::debug;

use shelfstock_core::validation::{
    parse_id, parse_price, parse_quantity, validate_product_name,
};
use shelfstock_core::{BrandDirectory, InventoryReport, Money, NewProduct, Product};
use shelfstock_db::{csv, Database};

use crate::error::AppResult;
use crate::menu::{MainMenuChoice, ProductMenuChoice};

/// Width of menu banners and section rules.
const RULE_WIDTH: usize = 50;

/// An interactive inventory session bound to one store handle.
pub struct Session<R, W> {
    db: Database,
    input: R,
    output: W,
    backup_path: PathBuf,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Creates a session over the given store, input, and output.
    pub fn new(db: Database, input: R, output: W, backup_path: impl Into<PathBuf>) -> Self {
        Session {
            db,
            input,
            output,
            backup_path: backup_path.into(),
        }
    }

    /// Runs the menu loop until the operator quits or input ends.
    pub async fn run(&mut self) -> AppResult<()> {
        loop {
            let Some(choice) = self.main_menu()? else {
                // Input ended; leave as quietly as a Q would, minus the text
                debug!("Input ended at main menu");
                return Ok(());
            };

            match choice {
                MainMenuChoice::NewProduct => self.add_product().await?,
                MainMenuChoice::ViewProduct => self.view_product().await?,
                MainMenuChoice::Analysis => self.analyze_products().await?,
                MainMenuChoice::Backup => self.backup().await?,
                MainMenuChoice::ListProducts => self.list_products().await?,
                MainMenuChoice::ListBrands => self.list_brands().await?,
                MainMenuChoice::Quit => {
                    writeln!(self.output)?;
                    writeln!(self.output, "Closing App. Goodbye!")?;
                    writeln!(self.output)?;
                    return Ok(());
                }
            }
        }
    }

    // =========================================================================
    // Menus
    // =========================================================================

    /// Shows the main menu until the operator picks a valid option.
    ///
    /// Returns `None` when input ends.
    fn main_menu(&mut self) -> AppResult<Option<MainMenuChoice>> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{:^RULE_WIDTH$}", "Store Inventory Management App")?;
            writeln!(self.output, "{}", "=".repeat(RULE_WIDTH))?;
            writeln!(self.output, "{:^RULE_WIDTH$}", "MAIN MENU")?;
            writeln!(self.output, "{}", "=".repeat(RULE_WIDTH))?;
            writeln!(self.output)?;
            writeln!(self.output, "N) New Product")?;
            writeln!(self.output, "V) View a Product by ID")?;
            writeln!(self.output, "A) View Product Analysis")?;
            writeln!(self.output, "B) Backup the Database")?;
            writeln!(self.output, "L) List All Products")?;
            writeln!(self.output, "R) List All Brands")?;
            writeln!(self.output, "Q) Quit the Application")?;

            let Some(line) = self.prompt("\nWhat would you like to do? ")? else {
                return Ok(None);
            };
            match MainMenuChoice::parse(&line) {
                Some(choice) => return Ok(Some(choice)),
                None => {
                    writeln!(self.output)?;
                    writeln!(self.output, "Please choose one of the options above.")?;
                }
            }
        }
    }

    /// Shows the viewed-product sub-menu until a valid option arrives.
    fn product_menu(&mut self) -> AppResult<Option<ProductMenuChoice>> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "            e - edit product")?;
            writeln!(self.output, "            d - delete product")?;
            writeln!(self.output, "            q - return to main menu")?;

            let Some(line) = self.prompt("\nWhat would you like to do? ")? else {
                return Ok(None);
            };
            match ProductMenuChoice::parse(&line) {
                Some(choice) => return Ok(Some(choice)),
                None => {
                    writeln!(self.output)?;
                    writeln!(self.output, "Please choose one of the options above.")?;
                }
            }
        }
    }

    // =========================================================================
    // Add Product
    // =========================================================================

    /// `N`: prompt for a product, coalescing duplicate names onto the most
    /// recently updated row instead of inserting a twin.
    async fn add_product(&mut self) -> AppResult<()> {
        self.section_header("ADD NEW PRODUCT")?;

        let Some(name) = self.prompt_name()? else {
            return Ok(());
        };
        let Some(quantity) = self.prompt_quantity(None)? else {
            return Ok(());
        };
        let Some(price) = self.prompt_price(None)? else {
            return Ok(());
        };
        let Some(brand_id) = self.prompt_brand(None).await? else {
            return Ok(());
        };

        let brands = BrandDirectory::new(self.db.brands().list().await?);
        let duplicates = self.db.products().find_by_name(&name).await?;

        if let Some(existing) = duplicates.first() {
            writeln!(self.output)?;
            writeln!(
                self.output,
                "NOTE: {} duplicate product(s) found with the same name: {}",
                duplicates.len(),
                name
            )?;
            writeln!(
                self.output,
                "The most recently edited version will be updated (product ID {})",
                existing.product_id
            )?;

            let confirmed =
                self.confirm_product_info(&name, quantity, price, brands.name_for(brand_id))?;
            if confirmed {
                let updated = Product {
                    product_id: existing.product_id,
                    product_name: name,
                    product_quantity: quantity,
                    product_price: price.cents(),
                    date_updated: Utc::now(),
                    brand_id,
                };
                self.db.products().update(&updated).await?;
                writeln!(self.output)?;
                writeln!(
                    self.output,
                    "Product ID {} has been updated in the database.",
                    existing.product_id
                )?;
            } else {
                writeln!(self.output)?;
                writeln!(self.output, "Product not updated.")?;
            }
        } else {
            let confirmed =
                self.confirm_product_info(&name, quantity, price, brands.name_for(brand_id))?;
            if confirmed {
                let new_product = NewProduct {
                    product_name: name.clone(),
                    product_quantity: quantity,
                    product_price: price.cents(),
                    date_updated: Utc::now(),
                    brand_id,
                };
                self.db.products().insert(&new_product).await?;
                writeln!(self.output)?;
                writeln!(self.output, "{} has been added to the database.", name)?;
            } else {
                writeln!(self.output)?;
                writeln!(self.output, "Product not added.")?;
            }
        }

        Ok(())
    }

    // =========================================================================
    // View / Edit / Delete
    // =========================================================================

    /// `V`: show one product by ID, then offer edit/delete.
    async fn view_product(&mut self) -> AppResult<()> {
        self.section_header("VIEW PRODUCT BY ID")?;

        let ids = self.db.products().ids().await?;
        if ids.is_empty() {
            writeln!(self.output, "There are no products in the database.")?;
            return Ok(());
        }

        let Some(product_id) = self.prompt_product_id(&ids)? else {
            return Ok(());
        };
        let product = self.db.products().get_by_id(product_id).await?;
        let brands = BrandDirectory::new(self.db.brands().list().await?);

        writeln!(self.output, "{}", "*".repeat(RULE_WIDTH))?;
        writeln!(self.output, "*** {} ***", product.product_name)?;
        writeln!(self.output, "Price: {}", product.price())?;
        writeln!(self.output, "Quantity: {}", product.product_quantity)?;
        writeln!(self.output, "Brand: {}", brands.name_for(product.brand_id))?;
        writeln!(self.output, "Date Updated: {}", product.updated_display())?;
        writeln!(self.output, "{}", "*".repeat(RULE_WIDTH))?;

        match self.product_menu()? {
            Some(ProductMenuChoice::Edit) => self.edit_product(product).await,
            Some(ProductMenuChoice::Delete) => self.delete_product(product).await,
            Some(ProductMenuChoice::Return) | None => Ok(()),
        }
    }

    /// Re-prompts quantity, price, and brand with current values shown, then
    /// saves with a fresh update timestamp.
    async fn edit_product(&mut self, product: Product) -> AppResult<()> {
        writeln!(self.output, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(self.output, "Editing {}", product.product_name)?;

        let Some(quantity) = self.prompt_quantity(Some(product.product_quantity))? else {
            return Ok(());
        };
        let Some(price) = self.prompt_price(Some(product.price()))? else {
            return Ok(());
        };
        let Some(brand_id) = self.prompt_brand(product.brand_id).await? else {
            return Ok(());
        };

        let brands = BrandDirectory::new(self.db.brands().list().await?);
        let confirmed = self.confirm_product_info(
            &product.product_name,
            quantity,
            price,
            brands.name_for(brand_id),
        )?;
        if confirmed {
            let updated = Product {
                product_id: product.product_id,
                product_name: product.product_name.clone(),
                product_quantity: quantity,
                product_price: price.cents(),
                date_updated: Utc::now(),
                brand_id,
            };
            self.db.products().update(&updated).await?;
            writeln!(self.output)?;
            writeln!(
                self.output,
                "{} has been updated in the database.",
                product.product_name
            )?;
        } else {
            writeln!(self.output)?;
            writeln!(self.output, "Product not updated.")?;
        }

        Ok(())
    }

    /// Asks for confirmation, then hard-deletes the product.
    async fn delete_product(&mut self, product: Product) -> AppResult<()> {
        let question = format!(
            "Are you sure you want to delete {}? (y/N): ",
            product.product_name
        );
        if self.confirm_line(&question)? {
            self.db.products().delete(product.product_id).await?;
            writeln!(self.output, "{} has been deleted.", product.product_name)?;
        } else {
            writeln!(
                self.output,
                "{} has not been deleted.",
                product.product_name
            )?;
        }
        Ok(())
    }

    // =========================================================================
    // Analysis / Backup / Listings
    // =========================================================================

    /// `A`: the price analysis report.
    async fn analyze_products(&mut self) -> AppResult<()> {
        self.section_header("PRODUCT ANALYSIS")?;

        let products = self.db.products().list().await?;
        if products.is_empty() {
            writeln!(self.output, "There are no products in the database to analyze.")?;
            return Ok(());
        }

        let brands = BrandDirectory::new(self.db.brands().list().await?);
        let report = InventoryReport::analyze(&products)?;

        writeln!(self.output)?;
        writeln!(self.output, "{}", report.render(&brands))?;
        self.pause()?;
        Ok(())
    }

    /// `B`: write the backup CSV and say where it went.
    async fn backup(&mut self) -> AppResult<()> {
        self.section_header("BACKUP DATABASE")?;
        writeln!(self.output, "Backing up data...")?;

        csv::export_backup(&self.db, &self.backup_path).await?;

        writeln!(
            self.output,
            "Product data has been backed-up to the file '{}'.",
            self.backup_path.display()
        )?;
        Ok(())
    }

    /// `L`: one line per product, ascending ID.
    async fn list_products(&mut self) -> AppResult<()> {
        self.section_header("LIST ALL PRODUCTS")?;

        let products = self.db.products().list().await?;
        let brands = BrandDirectory::new(self.db.brands().list().await?);
        for product in &products {
            writeln!(
                self.output,
                "{}: {}, Qty: {}, Price: {}, Brand: {}, Updated: {}",
                product.product_id,
                product.product_name,
                product.product_quantity,
                product.price(),
                brands.name_for(product.brand_id),
                product.updated_display()
            )?;
        }

        self.pause()?;
        Ok(())
    }

    /// `R`: one line per brand with its product count, ascending ID.
    async fn list_brands(&mut self) -> AppResult<()> {
        self.section_header("LIST ALL BRANDS")?;

        let brands = self.db.brands().list().await?;
        for brand in &brands {
            let count = self.db.products().count_by_brand(brand.brand_id).await?;
            writeln!(
                self.output,
                "{}: {}, Number of Products: {}",
                brand.brand_id, brand.brand_name, count
            )?;
        }

        self.pause()?;
        Ok(())
    }

    // =========================================================================
    // Prompt Helpers
    // =========================================================================

    /// Writes a prompt without a trailing newline and reads the reply.
    ///
    /// Returns `None` when input ends.
    fn prompt(&mut self, text: &str) -> AppResult<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks a yes/no question; anything but `y` (any case) declines, as does
    /// end of input.
    fn confirm_line(&mut self, question: &str) -> AppResult<bool> {
        match self.prompt(question)? {
            Some(answer) => Ok(answer.eq_ignore_ascii_case("y")),
            None => Ok(false),
        }
    }

    /// Prompts for a product name until it validates.
    fn prompt_name(&mut self) -> AppResult<Option<String>> {
        loop {
            let Some(line) = self.prompt("Name: ")? else {
                return Ok(None);
            };
            match validate_product_name(&line) {
                Ok(name) => return Ok(Some(name)),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    /// Prompts for a quantity until it validates. `current` switches the
    /// prompt into its editing form.
    fn prompt_quantity(&mut self, current: Option<i64>) -> AppResult<Option<i64>> {
        loop {
            let text = match current {
                Some(value) => format!(
                    "Current quantity is {}.\nPlease enter the new quantity: ",
                    value
                ),
                None => "Quantity: ".to_string(),
            };
            let Some(line) = self.prompt(&text)? else {
                return Ok(None);
            };
            match parse_quantity(&line) {
                Ok(quantity) => return Ok(Some(quantity)),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    /// Prompts for a price until it validates. `current` switches the prompt
    /// into its editing form.
    fn prompt_price(&mut self, current: Option<Money>) -> AppResult<Option<Money>> {
        loop {
            let text = match current {
                Some(value) => format!(
                    "Current price is {}.\nPlease enter the new price (Ex: 12.99): ",
                    value
                ),
                None => "Price (Ex: 12.99): ".to_string(),
            };
            let Some(line) = self.prompt(&text)? else {
                return Ok(None);
            };
            match parse_price(&line) {
                Ok(price) => return Ok(Some(price)),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    /// Prompts for a brand until the operator picks a listed ID or `x` for
    /// no brand. With no brands in the store there is nothing to pick, so
    /// the selection falls through to "no brand".
    ///
    /// Returns `Ok(None)` when input ends; `Ok(Some(None))` is a deliberate
    /// unbranded selection.
    async fn prompt_brand(&mut self, current: Option<i64>) -> AppResult<Option<Option<i64>>> {
        loop {
            let brands = self.db.brands().list().await?;
            if brands.is_empty() {
                writeln!(self.output, "No brands are listed yet. Continuing without a brand.")?;
                return Ok(Some(None));
            }

            writeln!(self.output, "Brand options list:")?;
            for brand in &brands {
                writeln!(self.output, "{}) {}", brand.brand_id, brand.brand_name)?;
            }

            let first = brands[0].brand_id;
            let last = brands[brands.len() - 1].brand_id;
            let text = match current {
                Some(id) => {
                    let directory = BrandDirectory::new(brands.clone());
                    format!(
                        "Current brand ID is {}: {}.\nPlease enter the new brand's ID ({}-{}) or 'X' if the brand is not listed: ",
                        id,
                        directory.name_for(Some(id)),
                        first,
                        last
                    )
                }
                None => format!(
                    "Enter a brand's ID ({}-{}) or 'X' if the brand is not listed: ",
                    first, last
                ),
            };

            let Some(line) = self.prompt(&text)? else {
                return Ok(None);
            };
            if line.eq_ignore_ascii_case("x") {
                return Ok(Some(None));
            }

            let id_set: BTreeSet<i64> = brands.iter().map(|b| b.brand_id).collect();
            match parse_id(&line, &id_set) {
                Ok(id) => return Ok(Some(Some(id))),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    /// Prompts for a product ID within the live ID set until it validates.
    fn prompt_product_id(&mut self, ids: &[i64]) -> AppResult<Option<i64>> {
        let (Some(&first), Some(&last)) = (ids.first(), ids.last()) else {
            return Ok(None);
        };
        let id_set: BTreeSet<i64> = ids.iter().copied().collect();

        loop {
            let text = format!("Enter a product's ID number ({}-{}): ", first, last);
            let Some(line) = self.prompt(&text)? else {
                return Ok(None);
            };
            match parse_id(&line, &id_set) {
                Ok(id) => return Ok(Some(id)),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    // =========================================================================
    // Rendering Helpers
    // =========================================================================

    /// Shows the entered product values and asks for a final go-ahead.
    fn confirm_product_info(
        &mut self,
        name: &str,
        quantity: i64,
        price: Money,
        brand_name: &str,
    ) -> AppResult<bool> {
        writeln!(self.output)?;
        writeln!(self.output, "Product Name: {}", name)?;
        writeln!(self.output, "Quantity: {}", quantity)?;
        writeln!(self.output, "Price: {}", price)?;
        writeln!(self.output, "Brand: {}", brand_name)?;
        writeln!(self.output)?;
        self.confirm_line("Is this correct? (y/N): ")
    }

    /// Prints a section header between two rules.
    fn section_header(&mut self, title: &str) -> AppResult<()> {
        writeln!(self.output, "{}", "-".repeat(RULE_WIDTH))?;
        writeln!(self.output, "{:^RULE_WIDTH$}", title)?;
        writeln!(self.output, "{}", "-".repeat(RULE_WIDTH))?;
        Ok(())
    }

    /// Waits for enter before returning to the main menu. End of input is
    /// as good as enter here.
    fn pause(&mut self) -> AppResult<()> {
        self.prompt("\nPress enter to return to the main menu.")?;
        Ok(())
    }
}
