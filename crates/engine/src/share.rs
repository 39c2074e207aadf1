//! Shareable text summary of a computed split.
//!
//! Pure formatting: reads the split result and the declared total, mutates
//! nothing. Front ends wrap the text in their share-link payload (the CLI
//! percent-encodes it into a WhatsApp URL).

use crate::split::SplitResult;

/// Render the bill amount plus one line per friend's owed amount.
///
/// Amounts are rounded to two decimals here, at the export boundary only.
pub fn share_message(declared_total: f64, result: &SplitResult) -> String {
    let mut message = String::from("*ShareFare - Bill Split Summary*\n\n");
    message.push_str(&format!("Bill Amount: \u{20b9}{declared_total:.2}\n\n"));
    message.push_str("*Individual Breakdown:*\n");
    for share in &result.shares {
        message.push_str(&format!(
            "\u{2022} {}: \u{20b9}{:.2}\n",
            share.name, share.amount
        ));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::Bill;

    #[test]
    fn message_lists_every_friend_rounded() {
        let mut bill = Bill::new(100.0).unwrap();
        let a = bill.add_friend("Ada").unwrap();
        let b = bill.add_friend("Brin").unwrap();
        bill.add_expense("Tapas", 100.0, &[a, b]).unwrap();

        let message = share_message(bill.declared_total, &bill.split());
        assert!(message.starts_with("*ShareFare - Bill Split Summary*"));
        assert!(message.contains("Bill Amount: \u{20b9}100.00"));
        assert!(message.contains("\u{2022} Ada: \u{20b9}50.00"));
        assert!(message.contains("\u{2022} Brin: \u{20b9}50.00"));
    }
}
