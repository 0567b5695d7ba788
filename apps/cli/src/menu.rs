//! # Menu Choices
//!
//! Typed dispatch keys for the two interactive menus.
//!
//! The session never branches on raw input strings; every command first
//! parses into one of these enums, and unknown input re-prompts.

// =============================================================================
// Main Menu
// =============================================================================

/// One operator command at the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuChoice {
    /// `N` - Add a new product (or update an existing one by name).
    NewProduct,
    /// `V` - View a product by ID, then optionally edit or delete it.
    ViewProduct,
    /// `A` - Show the price analysis report.
    Analysis,
    /// `B` - Back up products to a CSV file.
    Backup,
    /// `L` - List all products.
    ListProducts,
    /// `R` - List all brands.
    ListBrands,
    /// `Q` - Quit.
    Quit,
}

impl MainMenuChoice {
    /// Parses an operator-typed choice, case-insensitive and trimmed.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "n" => Some(MainMenuChoice::NewProduct),
            "v" => Some(MainMenuChoice::ViewProduct),
            "a" => Some(MainMenuChoice::Analysis),
            "b" => Some(MainMenuChoice::Backup),
            "l" => Some(MainMenuChoice::ListProducts),
            "r" => Some(MainMenuChoice::ListBrands),
            "q" => Some(MainMenuChoice::Quit),
            _ => None,
        }
    }
}

// =============================================================================
// Product Sub-Menu
// =============================================================================

/// One operator command at the viewed-product sub-menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductMenuChoice {
    /// `e` - Edit the viewed product.
    Edit,
    /// `d` - Delete the viewed product.
    Delete,
    /// `q` - Return to the main menu.
    Return,
}

impl ProductMenuChoice {
    /// Parses an operator-typed choice, case-insensitive and trimmed.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "e" => Some(ProductMenuChoice::Edit),
            "d" => Some(ProductMenuChoice::Delete),
            "q" => Some(ProductMenuChoice::Return),
            _ => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
