//! Interactive command loop.
//!
//! Commands map one-to-one onto engine operations plus the two external
//! collaborators. Friends and expenses are addressed by the 1-based indexes
//! printed by `friends` and `expenses`. The loop is sequential: while a scan
//! or sync is in flight no further input is processed, which is the
//! terminal rendition of "control disabled with a progress indicator".

use std::io::Write as _;

use reqwest::Url;
use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;

use api_types::sync::{PersonAmount, SyncRequest};
use engine::{DiscountType, Engine, share_message};

use crate::{
    client::Client,
    config::AppConfig,
    error::Result,
    session::SavedFriends,
};

/// Reconciliation threshold for the pass/fail marker on `difference`.
const DIFFERENCE_EPSILON: f64 = 0.01;
const SUGGESTION_LIMIT: usize = 5;
const SYNC_DESCRIPTION: &str = "ShareFare Bill";
const SPLITWISE_APP_URL: &str = "https://secure.splitwise.com/applinks/open";
const SPLITWISE_WEB_URL: &str = "https://secure.splitwise.com";
const WHATSAPP_URL: &str = "https://wa.me/";

const HELP: &str = "\
Commands:
  new <amount>                       start a bill from its declared total
  scan <image-path>                  start a bill from a scanned image
  reset                              discard the bill

  friends                            list friends (and quick-add suggestions)
  friend add <name>                  add a friend
  friend group <code>                add every member of a friend group
  friend rm <n>                      remove friend n

  expenses                           list expenses and who shares them
  expense add <label> <cost> <n...>  add an expense shared by friends n...
  expense edit <n> <label> <cost>    edit expense n in place
  expense rm <n>                     remove expense n

  assign <n>                         start reassigning who shares expense n
  toggle <n>                         toggle friend n in the open reassignment
  save                               commit the reassignment
  cancel                             discard the reassignment

  tax <amount> | fee <amount> | tip <amount>
  discount <flat|percentage> <value>

  summary                            per-friend breakdown and reconciliation
  share                              WhatsApp share message and link
  sync                               push the breakdown to the ledger service
  help | quit\n";

pub struct App {
    config: AppConfig,
    client: Client,
    engine: Engine,
    saved: SavedFriends,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.scan_url, &config.sync_url)?;

        // Read-once at startup; a broken cache never blocks the session.
        let saved = SavedFriends::load(&config.state_path).unwrap_or_else(|err| {
            tracing::warn!("session cache unavailable: {err}");
            SavedFriends::default()
        });

        Ok(Self {
            config,
            client,
            engine: Engine::new(),
            saved,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("ShareFare - split bills fairly among friends");
        println!("Type `help` for commands.");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("> ");
            std::io::stdout().flush()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            if self.dispatch(line.trim()).await {
                break;
            }
        }
        Ok(())
    }

    /// Handle one command line. Returns `true` on quit.
    async fn dispatch(&mut self, line: &str) -> bool {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => {}
            ["help"] => print!("{HELP}"),
            ["quit"] | ["exit"] => return true,

            ["new", amount] => self.cmd_new(amount),
            ["scan", path] => self.cmd_scan(path).await,
            ["reset"] => {
                self.engine.reset();
                println!("bill cleared");
            }

            ["friends"] => self.cmd_friends(),
            ["friend", "add", rest @ ..] if !rest.is_empty() => {
                self.cmd_friend_add(&rest.join(" "));
            }
            ["friend", "group", code] => self.cmd_friend_group(code),
            ["friend", "rm", index] => self.cmd_friend_rm(index),

            ["expenses"] => self.cmd_expenses(),
            ["expense", "add", label, cost, rest @ ..] => {
                self.cmd_expense_add(label, cost, rest);
            }
            ["expense", "edit", index, label, cost] => self.cmd_expense_edit(index, label, cost),
            ["expense", "rm", index] => self.cmd_expense_rm(index),

            ["assign", index] => self.cmd_assign(index),
            ["toggle", index] => self.cmd_toggle(index),
            ["save"] => match self.engine.commit_edit_assignments() {
                Ok(()) => println!("saved"),
                Err(err) => println!("{err}"),
            },
            ["cancel"] => match self.engine.cancel_edit_assignments() {
                Ok(()) => println!("cancelled"),
                Err(err) => println!("{err}"),
            },

            ["tax", value] => self.cmd_scalar("tax", value),
            ["fee", value] => self.cmd_scalar("fee", value),
            ["tip", value] => self.cmd_scalar("tip", value),
            ["discount", kind, value] => self.cmd_discount(kind, value),

            ["summary"] => self.cmd_summary(),
            ["share"] => self.cmd_share(),
            ["sync"] => self.cmd_sync().await,

            _ => println!("unknown command; type `help`"),
        }
        false
    }

    // ---- Bill lifecycle ----

    fn cmd_new(&mut self, amount: &str) {
        let Ok(amount) = amount.parse::<f64>() else {
            println!("invalid amount");
            return;
        };
        match self.engine.create_bill(amount) {
            Ok(()) => println!("bill started at \u{20b9}{amount:.2}"),
            Err(err) => println!("{err}"),
        }
    }

    async fn cmd_scan(&mut self, path: &str) {
        println!("processing bill image...");

        // The loop awaits here, so no other command can run mid-scan.
        let result = self.client.scan_bill(std::path::Path::new(path)).await;

        match result {
            Ok(data) => {
                let items = data.items.len();
                // The previous bill is only replaced by a fully built one.
                self.engine.apply_scan(data);
                let declared = self.engine.bill().map(|b| b.declared_total).unwrap_or(0.0);
                println!(
                    "scan complete: bill \u{20b9}{declared:.2}, {items} item(s) awaiting assignment"
                );
            }
            Err(err) => println!("{err}"),
        }
    }

    // ---- Friends ----

    fn cmd_friends(&self) {
        let Some(bill) = self.engine.bill() else {
            println!("no active bill");
            return;
        };
        if bill.friends().is_empty() {
            println!("no friends added yet");
            let suggestions = self.saved.suggestions(SUGGESTION_LIMIT);
            if !suggestions.is_empty() {
                println!("quick add from previous sessions: {}", suggestions.join(", "));
            }
            return;
        }
        for (index, friend) in bill.friends().iter().enumerate() {
            println!("{}. {}", index + 1, friend.name);
        }
    }

    fn cmd_friend_add(&mut self, name: &str) {
        match self.engine.add_friend(name) {
            Ok(_) => {
                println!("added {}", name.trim());
                self.persist_friends();
            }
            Err(err) => println!("{err}"),
        }
    }

    fn cmd_friend_group(&mut self, code: &str) {
        match self.engine.add_friend_group(code) {
            Ok(ids) => {
                println!("added {} friend(s) from group {code}", ids.len());
                self.persist_friends();
            }
            Err(err) => println!("{err}"),
        }
    }

    fn cmd_friend_rm(&mut self, index: &str) {
        let Some(friend_id) = self.friend_at(index) else {
            println!("no such friend");
            return;
        };
        if self.engine.remove_friend(friend_id).is_ok() {
            println!("removed");
        }
    }

    /// Write-through mirror of the friend list; failures are non-fatal.
    fn persist_friends(&mut self) {
        self.saved.names = self.engine.friend_names();
        if let Err(err) = self.saved.save(&self.config.state_path) {
            tracing::warn!("session cache unavailable: {err}");
        }
    }

    // ---- Expenses ----

    fn cmd_expenses(&self) {
        let Some(bill) = self.engine.bill() else {
            println!("no active bill");
            return;
        };
        if bill.expenses().is_empty() {
            println!("no expenses added yet");
            return;
        }
        for (index, expense) in bill.expenses().iter().enumerate() {
            let sharers: Vec<String> = bill
                .assignments()
                .friends_of(expense.id)
                .into_iter()
                .filter_map(|id| bill.friends().iter().find(|f| f.id == id))
                .map(|f| f.name.clone())
                .collect();
            let shared_by = if sharers.is_empty() {
                "not assigned".to_string()
            } else {
                sharers.join(", ")
            };
            println!(
                "{}. {} \u{20b9}{:.2} ({shared_by})",
                index + 1,
                expense.label,
                expense.cost
            );
        }
        if let Some(session) = bill.editing() {
            let label = bill
                .expense(session.expense_id)
                .map(|e| e.label.clone())
                .unwrap_or_default();
            println!("editing sharers of: {label}");
        }
    }

    fn cmd_expense_add(&mut self, label: &str, cost: &str, friend_indexes: &[&str]) {
        let Ok(cost) = cost.parse::<f64>() else {
            println!("invalid cost");
            return;
        };
        let mut friend_ids = Vec::with_capacity(friend_indexes.len());
        for index in friend_indexes {
            let Some(id) = self.friend_at(index) else {
                println!("no such friend: {index}");
                return;
            };
            friend_ids.push(id);
        }
        match self.engine.add_expense(label, cost, &friend_ids) {
            Ok(_) => println!("added {label}"),
            Err(err) => println!("{err}"),
        }
    }

    fn cmd_expense_edit(&mut self, index: &str, label: &str, cost: &str) {
        let Some(expense_id) = self.expense_at(index) else {
            println!("no such expense");
            return;
        };
        let Ok(cost) = cost.parse::<f64>() else {
            println!("invalid cost");
            return;
        };
        match self.engine.update_expense(expense_id, label, cost) {
            Ok(()) => println!("updated"),
            Err(err) => println!("{err}"),
        }
    }

    fn cmd_expense_rm(&mut self, index: &str) {
        let Some(expense_id) = self.expense_at(index) else {
            println!("no such expense");
            return;
        };
        if self.engine.remove_expense(expense_id).is_ok() {
            println!("removed");
        }
    }

    // ---- Assignment editing ----

    fn cmd_assign(&mut self, index: &str) {
        let Some(expense_id) = self.expense_at(index) else {
            println!("no such expense");
            return;
        };
        match self.engine.begin_edit_assignments(expense_id) {
            Ok(()) => println!("toggle friends, then `save` or `cancel`"),
            Err(err) => println!("{err}"),
        }
    }

    fn cmd_toggle(&mut self, index: &str) {
        let Some(friend_id) = self.friend_at(index) else {
            println!("no such friend");
            return;
        };
        if let Err(err) = self.engine.toggle_editing_friend(friend_id) {
            println!("{err}");
        }
    }

    // ---- Shared costs ----

    fn cmd_scalar(&mut self, which: &str, value: &str) {
        let Ok(value) = value.parse::<f64>() else {
            println!("invalid amount");
            return;
        };
        let result = match which {
            "tax" => self.engine.set_tax(value),
            "fee" => self.engine.set_service_fee(value),
            _ => self.engine.set_tip(value),
        };
        if let Err(err) = result {
            println!("{err}");
        }
    }

    fn cmd_discount(&mut self, kind: &str, value: &str) {
        let Ok(kind) = DiscountType::try_from(kind) else {
            println!("discount type is `flat` or `percentage`");
            return;
        };
        let Ok(value) = value.parse::<f64>() else {
            println!("invalid amount");
            return;
        };
        if let Err(err) = self.engine.set_discount(kind, value) {
            println!("{err}");
        }
    }

    // ---- Summary and exports ----

    fn cmd_summary(&self) {
        let Some(bill) = self.engine.bill() else {
            println!("no active bill");
            return;
        };
        let result = bill.split();

        println!("Bill Amount:      \u{20b9}{:.2}", bill.declared_total);
        println!("Calculated Total: \u{20b9}{:.2}", result.calculated_total);
        let marker = if result.difference.abs() < DIFFERENCE_EPSILON {
            "ok"
        } else {
            "off"
        };
        println!(
            "Difference:       \u{20b9}{:.2} [{marker}]",
            result.difference.abs()
        );

        if result.shares.is_empty() {
            println!("add friends to see the split");
            return;
        }
        for share in &result.shares {
            println!("  {}: \u{20b9}{:.2}", share.name, share.amount);
            for item in &share.items {
                println!("    \u{2022} {item}");
            }
        }
    }

    fn cmd_share(&self) {
        let Some(bill) = self.engine.bill() else {
            println!("no active bill");
            return;
        };
        let result = bill.split();
        if result.shares.is_empty() {
            println!("add friends before sharing");
            return;
        }

        let message = share_message(bill.declared_total, &result);
        print!("{message}");
        match Url::parse_with_params(WHATSAPP_URL, [("text", message.as_str())]) {
            Ok(url) => println!("\nshare link: {url}"),
            Err(err) => tracing::debug!("share link unavailable: {err}"),
        }
    }

    async fn cmd_sync(&mut self) {
        let Some(bill) = self.engine.bill() else {
            println!("no active bill");
            return;
        };
        let result = bill.split();
        if result.shares.is_empty() {
            println!("add friends before syncing");
            return;
        }

        let request = SyncRequest {
            bill_amount: bill.declared_total,
            bill_description: SYNC_DESCRIPTION.to_string(),
            expenses: result
                .shares
                .iter()
                .map(|share| PersonAmount {
                    name: share.name.clone(),
                    // Export boundary: amounts leave the engine rounded.
                    amount: (share.amount * 100.0).round() / 100.0,
                })
                .collect(),
        };

        println!("syncing...");
        match self.client.sync_ledger(&request).await {
            Ok(response) if !response.not_found.is_empty() => {
                if let Some(message) = response.message {
                    println!("{message}");
                }
                println!(
                    "these friends weren't found in the ledger service, add them first: {}",
                    response.not_found.join(", ")
                );
            }
            Ok(_) => {
                println!("synced; open {SPLITWISE_APP_URL}");
                println!("or on the web: {SPLITWISE_WEB_URL}");
            }
            Err(err) => println!("{err}"),
        }
    }

    // ---- Index helpers ----

    fn friend_at(&self, token: &str) -> Option<Uuid> {
        let index = token.parse::<usize>().ok()?.checked_sub(1)?;
        self.engine.bill()?.friends().get(index).map(|f| f.id)
    }

    fn expense_at(&self, token: &str) -> Option<Uuid> {
        let index = token.parse::<usize>().ok()?.checked_sub(1)?;
        self.engine.bill()?.expenses().get(index).map(|e| e.id)
    }
}
