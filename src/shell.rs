//! Interactive ordering shell
//!
//! A line-oriented front end for an [`OrderSession`]: each input line is one
//! command (`menu`, `add`, `remove`, `cart`, `clear`, `submit`, `quit`),
//! parsed with clap in multicall mode so the first word is the subcommand.

use crate::cart::{
    AddOutcome, AddRequest, CartError, DrinkOptions, ParseOptionError, PickupMethod, Sweetness,
    Temperature,
};
use crate::client::OrderGateway;
use crate::menu::{Category, Menu};
use crate::session::{OrderSession, SubmitError};
use clap::{Parser, Subcommand};
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const PROMPT: &str = "canteen> ";

/// Errors reported back to the shell user
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Unterminated quote")]
    UnterminatedQuote,

    /// Rendered clap usage or help text
    #[error("{0}")]
    Usage(String),

    #[error("Invalid item '{0}', expected ID[:QTY[:TEMPERATURE:SWEETNESS]]")]
    InvalidItemSpec(String),

    #[error("Drinks need both a temperature and a sweetness")]
    IncompleteDrinkOptions,

    #[error(transparent)]
    Option(#[from] ParseOptionError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error("{}", .0.user_message())]
    Submit(#[from] SubmitError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One shell input line
#[derive(Debug, Parser)]
#[command(multicall = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum ShellCommand {
    /// Show the menu
    Menu,

    /// Add an item to the cart
    Add {
        /// Item id (see `menu`)
        item_id: String,
        /// Quantity (1-99)
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
        /// Drink temperature (normal-ice, less-ice, light-ice, no-ice, warm, hot)
        #[arg(short, long)]
        temperature: Option<Temperature>,
        /// Drink sweetness (normal-sugar, less-sugar, half-sugar, light-sugar, no-sugar)
        #[arg(short, long)]
        sweetness: Option<Sweetness>,
    },

    /// Remove a line from the cart by its position
    Remove {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        position: u64,
    },

    /// Show the cart
    Cart,

    /// Empty the cart
    Clear,

    /// Send the order
    Submit {
        /// Customer name
        #[arg(short, long, default_value = "")]
        name: String,
        /// dine-in or takeout
        #[arg(short, long)]
        pickup: Option<String>,
        /// Note for the kitchen
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// `ID[:QTY[:TEMPERATURE:SWEETNESS]]`, as accepted by `canteen order --item`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    pub item_id: String,
    pub quantity: u32,
    pub drink: Option<DrinkOptions>,
}

impl ItemSpec {
    fn from_parts(
        item_id: String,
        quantity: u32,
        temperature: Option<Temperature>,
        sweetness: Option<Sweetness>,
    ) -> Result<Self, ShellError> {
        let drink = match (temperature, sweetness) {
            (Some(t), Some(s)) => Some(DrinkOptions::new(t, s)),
            (None, None) => None,
            _ => return Err(ShellError::IncompleteDrinkOptions),
        };
        Ok(Self {
            item_id,
            quantity,
            drink,
        })
    }

    /// Build the cart request; drinks without options get the form defaults
    pub fn into_request(self, menu: &Menu) -> AddRequest {
        let drink = match self.drink {
            Some(options) => Some(options),
            None if menu.is_drink(&self.item_id) => Some(DrinkOptions::default()),
            None => None,
        };
        AddRequest {
            item_id: self.item_id,
            quantity: self.quantity,
            drink,
        }
    }
}

impl FromStr for ItemSpec {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ShellError::InvalidItemSpec(s.to_string());
        let parts: Vec<&str> = s.trim().split(':').collect();

        let item_id = match parts.first() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => return Err(invalid()),
        };
        let quantity = match parts.get(1) {
            Some(q) => q.parse().map_err(|_| invalid())?,
            None => 1,
        };

        match parts.len() {
            1 | 2 => Self::from_parts(item_id, quantity, None, None),
            4 => Self::from_parts(
                item_id,
                quantity,
                Some(parts[2].parse()?),
                Some(parts[3].parse()?),
            ),
            3 => Err(ShellError::IncompleteDrinkOptions),
            _ => Err(invalid()),
        }
    }
}

/// Split a command line into words, honouring single and double quotes
pub fn split_words(line: &str) -> Result<Vec<String>, ShellError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(ShellError::UnterminatedQuote);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

/// Parse one input line; `Ok(None)` for a blank line
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, ShellError> {
    let words = split_words(line)?;
    if words.is_empty() {
        return Ok(None);
    }
    ShellLine::try_parse_from(words)
        .map(|parsed| Some(parsed.command))
        .map_err(|e| ShellError::Usage(e.render().to_string()))
}

fn category_title(category: Category) -> &'static str {
    match category {
        Category::Mains => "Mains",
        Category::Soups => "Soups",
        Category::Desserts => "Desserts",
        Category::Drinks => "Drinks",
    }
}

/// Render the menu grouped by category
pub fn render_menu(menu: &Menu) -> String {
    let mut out = String::new();
    for section in menu.sections() {
        if section.items.is_empty() {
            continue;
        }
        out.push_str(&format!("== {} ==\n", category_title(section.category)));
        for item in &section.items {
            out.push_str(&format!("  {:<6} {:<30} NT$ {:>4}\n", item.id, item.name, item.price));
        }
    }
    if out.is_empty() {
        out.push_str("The menu is empty\n");
    }
    out
}

/// Outcome of one command
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// Run one command against the session
pub async fn execute<G: OrderGateway>(
    session: &mut OrderSession<G>,
    command: ShellCommand,
    default_pickup: PickupMethod,
) -> Result<Reply, ShellError> {
    let text = match command {
        ShellCommand::Menu => render_menu(session.menu()),

        ShellCommand::Add {
            item_id,
            quantity,
            temperature,
            sweetness,
        } => {
            let spec = ItemSpec::from_parts(item_id, quantity, temperature, sweetness)?;
            let request = spec.into_request(session.menu());
            let item_id = request.item_id.clone();

            match session.add(request)? {
                AddOutcome::Ignored => format!("No such item: {}", item_id),
                AddOutcome::Appended { index } => format!(
                    "Added {}\nTotal: NT$ {}",
                    session.cart().lines()[index],
                    session.cart().compute_total()
                ),
                AddOutcome::Merged { index, clamped, .. } => {
                    let mut text = format!("Updated {}", session.cart().lines()[index]);
                    if clamped {
                        text.push_str(" (limit reached)");
                    }
                    text.push_str(&format!("\nTotal: NT$ {}", session.cart().compute_total()));
                    text
                }
            }
        }

        ShellCommand::Remove { position } => {
            let line = session.remove((position - 1) as usize)?;
            format!(
                "Removed {}\nTotal: NT$ {}",
                line,
                session.cart().compute_total()
            )
        }

        ShellCommand::Cart => session.summary().to_string(),

        ShellCommand::Clear => {
            session.clear();
            "Cart cleared".to_string()
        }

        ShellCommand::Submit { name, pickup, note } => {
            let pickup = pickup.unwrap_or_else(|| default_pickup.name().to_string());
            let receipt = session.submit(&name, &pickup, &note).await?;
            let mut text = format!("Order placed! Your order number is {}", receipt.order_number);
            if !receipt.message.is_empty() {
                text = format!("{}\n{}", receipt.message, text);
            }
            text
        }

        ShellCommand::Quit => return Ok(Reply::Quit),
    };

    Ok(Reply::Text(text))
}

/// Read commands from `input` until EOF or `quit`, writing replies to `output`
pub async fn run<G, R, W>(
    session: &mut OrderSession<G>,
    input: R,
    mut output: W,
    default_pickup: PickupMethod,
) -> Result<(), ShellError>
where
    G: OrderGateway,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let reply = match parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(command)) => execute(session, command, default_pickup).await,
            Err(e) => Err(e),
        };

        match reply {
            Ok(Reply::Quit) => break,
            Ok(Reply::Text(text)) => {
                output.write_all(text.as_bytes()).await?;
                output.write_all(b"\n").await?;
            }
            Err(ShellError::Usage(usage)) => {
                output.write_all(usage.as_bytes()).await?;
            }
            Err(ShellError::Io(e)) => return Err(ShellError::Io(e)),
            Err(e) => {
                output.write_all(format!("error: {}\n", e).as_bytes()).await?;
            }
        }
    }

    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
