use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddProduct,
    UpdateQuantity,
    RemoveProduct,
    DisplayCart,
    DisplayProducts,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::AddProduct,
        MenuChoice::UpdateQuantity,
        MenuChoice::RemoveProduct,
        MenuChoice::DisplayCart,
        MenuChoice::DisplayProducts,
        MenuChoice::Exit,
    ];

    pub fn number(&self) -> u8 {
        match self {
            MenuChoice::AddProduct => 1,
            MenuChoice::UpdateQuantity => 2,
            MenuChoice::RemoveProduct => 3,
            MenuChoice::DisplayCart => 4,
            MenuChoice::DisplayProducts => 5,
            MenuChoice::Exit => 6,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::AddProduct => "Add product to cart",
            MenuChoice::UpdateQuantity => "Update quantity",
            MenuChoice::RemoveProduct => "Remove product from cart",
            MenuChoice::DisplayCart => "Display cart",
            MenuChoice::DisplayProducts => "Display available products",
            MenuChoice::Exit => "Exit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid choice: {input}")]
pub struct InvalidChoice {
    pub input: String,
}

impl FromStr for MenuChoice {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        input
            .parse::<u8>()
            .ok()
            .and_then(|n| MenuChoice::ALL.into_iter().find(|choice| choice.number() == n))
            .ok_or_else(|| InvalidChoice {
                input: input.to_string(),
            })
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}
