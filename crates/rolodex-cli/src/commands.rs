//! Subcommands that act on the address book.
//!
//! Each command runs against an already-opened [`AddressBook`] and returns the
//! text to print. Questions for the user go through the `confirm` callback so
//! the commands can run without a terminal.

use std::{io, path::PathBuf};

use anyhow::{Context as _, Result, bail};
use clap::{Args, Subcommand};
use rolodex_core::{
  book::{AddressBook, SortDirection},
  contact::{ContactDraft, ContactId, ContactPatch},
  snapshot::{SUGGESTED_FILE_NAME, SnapshotStore},
};
use rolodex_store_sqlite::export::{timestamped_file_name, write_snapshot};

use crate::output;

/// Asks the user a yes/no question.
pub type Confirm<'a> = &'a mut dyn FnMut(&str) -> io::Result<bool>;

#[derive(Subcommand, Debug)]
pub enum BookCommand {
  /// List contacts, favorites first, optionally filtered by name or phone.
  List {
    /// Case-insensitive name match or literal phone match.
    query: Option<String>,
    /// Name order after favorites: `asc` (A→Z) or `desc` (Z→A).
    #[arg(long, default_value_t = SortDirection::Asc)]
    direction: SortDirection,
    /// Print JSON instead of text.
    #[arg(long)]
    json:      bool,
  },
  /// Show a single contact.
  Show {
    id:   ContactId,
    #[arg(long)]
    json: bool,
  },
  /// Add a contact.
  Add(AddArgs),
  /// Change some fields of a contact; the rest are kept.
  Edit(EditArgs),
  /// Delete a contact.
  Delete {
    id:  ContactId,
    /// Do not ask for confirmation.
    #[arg(short, long)]
    yes: bool,
  },
  /// Toggle a contact's favorite flag.
  Fav { id: ContactId },
  /// Reverse the stored order of contacts (the order `export` writes).
  Sort,
  /// Show contact and favorite totals.
  Stats,
  /// Save all contacts to a JSON file.
  Export {
    /// Target file (default: contacts.json).
    #[arg(conflicts_with = "timestamp")]
    path:      Option<PathBuf>,
    /// Overwrite an existing file without asking.
    #[arg(short, long)]
    force:     bool,
    /// Name the file after the current time.
    #[arg(long)]
    timestamp: bool,
  },
}

#[derive(Args, Debug)]
pub struct AddArgs {
  #[arg(long)]
  pub name:     String,
  #[arg(long)]
  pub phone:    String,
  #[arg(long)]
  pub email:    Option<String>,
  /// Profile image URL.
  #[arg(long)]
  pub image:    Option<String>,
  #[arg(long)]
  pub favorite: bool,
}

#[derive(Args, Debug)]
pub struct EditArgs {
  pub id:          ContactId,
  #[arg(long)]
  pub name:        Option<String>,
  #[arg(long)]
  pub phone:       Option<String>,
  #[arg(long, conflicts_with = "clear_email")]
  pub email:       Option<String>,
  /// Profile image URL.
  #[arg(long, conflicts_with = "clear_image")]
  pub image:       Option<String>,
  #[arg(long)]
  pub clear_email: bool,
  #[arg(long)]
  pub clear_image: bool,
  #[arg(long)]
  pub favorite:    Option<bool>,
}

impl EditArgs {
  fn into_patch(self) -> ContactPatch {
    let email = if self.clear_email { Some(None) } else { self.email.map(Some) };
    let profile_image = if self.clear_image { Some(None) } else { self.image.map(Some) };
    ContactPatch {
      name: self.name,
      phone: self.phone,
      email,
      profile_image,
      favorite: self.favorite,
    }
  }
}

/// Result of [`BookCommand::Export`]; declining to overwrite is not an error.
#[derive(Debug, PartialEq, Eq)]
pub enum ExportOutcome {
  Written(PathBuf),
  Cancelled,
}

fn require_name(name: &str) -> Result<()> {
  if name.trim().is_empty() {
    bail!("name must not be empty");
  }
  Ok(())
}

/// Run `command` against `book` and return what should be printed.
pub async fn run<P>(
  book: &mut AddressBook<P>,
  command: BookCommand,
  confirm: Confirm<'_>,
) -> Result<String>
where
  P: SnapshotStore,
{
  match command {
    BookCommand::List {
      query,
      direction,
      json,
    } => {
      if direction != book.direction() {
        book.toggle_sort();
      }
      book.set_query(query.as_deref().unwrap_or_default());
      let contacts = book.listing();
      if json {
        return Ok(serde_json::to_string_pretty(&contacts)?);
      }
      Ok(output::listing(&contacts, book.query()))
    }

    BookCommand::Show { id, json } => {
      let contact = book
        .store()
        .get_by_id(id)
        .with_context(|| format!("no contact with id {id}"))?;
      if json {
        return Ok(serde_json::to_string_pretty(&contact)?);
      }
      Ok(output::detail(&contact))
    }

    BookCommand::Add(args) => {
      require_name(&args.name)?;
      let draft = ContactDraft {
        name:          args.name.trim().to_owned(),
        phone:         args.phone,
        email:         args.email,
        profile_image: args.image,
        favorite:      Some(args.favorite),
      };
      let contact = book.create(draft).await?;
      Ok(format!("Added {}", output::contact_line(&contact)))
    }

    BookCommand::Edit(args) => {
      let id = args.id;
      if let Some(name) = &args.name {
        require_name(name)?;
      }
      let patch = args.into_patch();
      if patch.is_empty() {
        bail!("nothing to change; pass at least one field");
      }
      if !book.edit(id, patch).await? {
        bail!("no contact with id {id}");
      }
      let contact = book
        .store()
        .get_by_id(id)
        .with_context(|| format!("no contact with id {id}"))?;
      Ok(format!("Updated {}", output::contact_line(&contact)))
    }

    BookCommand::Delete { id, yes } => {
      let contact = book
        .store()
        .get_by_id(id)
        .with_context(|| format!("no contact with id {id}"))?;
      if !yes && !confirm(&format!("Delete {}?", contact.name))? {
        return Ok("Kept.".to_string());
      }
      if !book.remove(id).await? {
        bail!("no contact with id {id}");
      }
      Ok(format!("Deleted {}", contact.name))
    }

    BookCommand::Fav { id } => {
      if !book.toggle_favorite(id).await? {
        bail!("no contact with id {id}");
      }
      let contact = book
        .store()
        .get_by_id(id)
        .with_context(|| format!("no contact with id {id}"))?;
      let verb = if contact.favorite { "Starred" } else { "Unstarred" };
      Ok(format!("{verb} {}", contact.name))
    }

    BookCommand::Sort => {
      book.toggle_sort();
      book.save().await?;
      Ok(format!(
        "Reversed the stored order of {} contacts. Listings still show favorites \
         first, then names; use `list --direction desc` for Z→A.",
        book.store().len()
      ))
    }

    BookCommand::Stats => Ok(output::stats_line(book.stats())),

    BookCommand::Export {
      path,
      force,
      timestamp,
    } => {
      let path = path.unwrap_or_else(|| {
        if timestamp {
          PathBuf::from(timestamped_file_name(chrono::Local::now()))
        } else {
          PathBuf::from(SUGGESTED_FILE_NAME)
        }
      });
      match export(book, path, force, confirm).await? {
        ExportOutcome::Written(path) => {
          Ok(format!("Contacts saved to {}", path.display()))
        }
        ExportOutcome::Cancelled => Ok("Export cancelled.".to_string()),
      }
    }
  }
}

/// Persist the book, then write the same snapshot to `path`.
pub async fn export<P>(
  book: &AddressBook<P>,
  path: PathBuf,
  force: bool,
  confirm: Confirm<'_>,
) -> Result<ExportOutcome>
where
  P: SnapshotStore,
{
  book.save().await?;

  if path.exists()
    && !force
    && !confirm(&format!("{} already exists. Overwrite?", path.display()))?
  {
    tracing::info!(path = %path.display(), "export cancelled");
    return Ok(ExportOutcome::Cancelled);
  }

  write_snapshot(&path, &book.snapshot())
    .await
    .with_context(|| format!("failed to write {}", path.display()))?;
  Ok(ExportOutcome::Written(path))
}

#[cfg(test)]
mod tests {
  use rolodex_core::{
    contact::Contact,
    snapshot::{MemoryStore, Snapshot},
  };

  use super::*;

  async fn seeded() -> AddressBook<MemoryStore> {
    AddressBook::open(MemoryStore::new(), true).await.unwrap()
  }

  fn answer(yes: bool) -> impl FnMut(&str) -> io::Result<bool> {
    move |_: &str| Ok(yes)
  }

  fn never_asked() -> impl FnMut(&str) -> io::Result<bool> {
    |q: &str| panic!("unexpected question: {q}")
  }

  #[tokio::test]
  async fn list_filters_and_orders() {
    let mut book = seeded().await;
    let out = run(
      &mut book,
      BookCommand::List {
        query: Some("j".into()),
        direction: SortDirection::Asc,
        json:      false,
      },
      &mut never_asked(),
    )
    .await
    .unwrap();

    let names: Vec<_> = out.lines().collect();
    assert_eq!(names.len(), 3);
    assert!(names[0].contains("David Johnson"));
    assert!(names[1].contains("John Doe"));
    assert!(names[2].contains("Jane Smith"));
  }

  #[tokio::test]
  async fn list_descending_keeps_favorites_first() {
    let mut book = seeded().await;
    let command = BookCommand::List {
      query:     None,
      direction: "desc".parse().unwrap(),
      json:      true,
    };
    let out = run(&mut book, command, &mut never_asked()).await.unwrap();

    let contacts: Vec<Contact> = serde_json::from_str(&out).unwrap();
    let names: Vec<_> = contacts.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
      names,
      ["John Doe", "David Johnson", "Sarah Williams", "Jane Smith"]
    );
    assert_eq!(book.direction(), SortDirection::Desc);
  }

  #[tokio::test]
  async fn list_reports_empty_search() {
    let mut book = seeded().await;
    let out = run(
      &mut book,
      BookCommand::List {
        query: Some("zzz".into()),
        direction: SortDirection::Asc,
        json:      false,
      },
      &mut never_asked(),
    )
    .await
    .unwrap();
    assert_eq!(out, "No contacts found matching \"zzz\"");
  }

  #[tokio::test]
  async fn add_rejects_blank_name() {
    let mut book = seeded().await;
    let args = AddArgs {
      name:     "   ".into(),
      phone:    "1".into(),
      email:    None,
      image:    None,
      favorite: false,
    };
    let err = run(&mut book, BookCommand::Add(args), &mut never_asked())
      .await
      .unwrap_err();
    assert!(err.to_string().contains("name"));
    assert_eq!(book.store().len(), 4);
  }

  #[tokio::test]
  async fn add_then_show_as_json() {
    let mut book = seeded().await;
    let args = AddArgs {
      name:     "Ama Owusu".into(),
      phone:    "0201112222".into(),
      email:    Some("ama@example.com".into()),
      image:    None,
      favorite: true,
    };
    run(&mut book, BookCommand::Add(args), &mut never_asked())
      .await
      .unwrap();

    let out = run(
      &mut book,
      BookCommand::Show { id: 5, json: true },
      &mut never_asked(),
    )
    .await
    .unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["name"], "Ama Owusu");
    assert_eq!(json["favorite"], true);
    assert_eq!(book.persistence().saved().unwrap().next_id, 6);
  }

  #[tokio::test]
  async fn edit_clears_email_and_keeps_other_fields() {
    let mut book = seeded().await;
    let args = EditArgs {
      id:          2,
      name:        None,
      phone:       Some("0509999999".into()),
      email:       None,
      image:       None,
      clear_email: true,
      clear_image: false,
      favorite:    None,
    };
    run(&mut book, BookCommand::Edit(args), &mut never_asked())
      .await
      .unwrap();

    let jane = book.store().get_by_id(2).unwrap();
    assert_eq!(jane.name, "Jane Smith");
    assert_eq!(jane.phone, "0509999999");
    assert_eq!(jane.email, None);
  }

  #[tokio::test]
  async fn edit_with_blank_email_clears_it() {
    let mut book = seeded().await;
    let args = EditArgs {
      id:          1,
      name:        None,
      phone:       None,
      email:       Some(String::new()),
      image:       None,
      clear_email: false,
      clear_image: false,
      favorite:    None,
    };
    let out = run(&mut book, BookCommand::Edit(args), &mut never_asked())
      .await
      .unwrap();

    assert_eq!(book.store().get_by_id(1).unwrap().email, None);
    assert!(out.ends_with("0241234567"), "{out}");
  }

  #[tokio::test]
  async fn edit_without_fields_is_an_error() {
    let mut book = seeded().await;
    let args = EditArgs {
      id:          2,
      name:        None,
      phone:       None,
      email:       None,
      image:       None,
      clear_email: false,
      clear_image: false,
      favorite:    None,
    };
    assert!(
      run(&mut book, BookCommand::Edit(args), &mut never_asked())
        .await
        .is_err()
    );
  }

  #[tokio::test]
  async fn delete_respects_confirmation() {
    let mut book = seeded().await;

    let out = run(
      &mut book,
      BookCommand::Delete { id: 1, yes: false },
      &mut answer(false),
    )
    .await
    .unwrap();
    assert_eq!(out, "Kept.");
    assert_eq!(book.store().len(), 4);

    run(
      &mut book,
      BookCommand::Delete { id: 1, yes: false },
      &mut answer(true),
    )
    .await
    .unwrap();
    assert!(book.store().get_by_id(1).is_none());
  }

  #[tokio::test]
  async fn delete_missing_is_an_error() {
    let mut book = seeded().await;
    let result = run(
      &mut book,
      BookCommand::Delete { id: 42, yes: true },
      &mut never_asked(),
    )
    .await;
    assert!(result.is_err());
  }

  #[tokio::test]
  async fn fav_toggles_and_stats_follow() {
    let mut book = seeded().await;
    let out = run(&mut book, BookCommand::Fav { id: 4 }, &mut never_asked())
      .await
      .unwrap();
    assert_eq!(out, "Starred Sarah Williams");

    let stats = run(&mut book, BookCommand::Stats, &mut never_asked())
      .await
      .unwrap();
    assert_eq!(stats, "4 contacts, 3 favorites");
  }

  #[tokio::test]
  async fn sort_persists_reversed_order() {
    let mut book = seeded().await;
    let out = run(&mut book, BookCommand::Sort, &mut never_asked())
      .await
      .unwrap();
    assert!(out.starts_with("Reversed the stored order of 4 contacts."), "{out}");
    assert!(out.contains("--direction desc"), "{out}");

    let saved = book.persistence().saved().unwrap();
    let ids: Vec<_> = saved.contacts.iter().map(|c| c.id).collect();
    assert_eq!(ids, [4, 3, 2, 1]);
  }

  // ── Export ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn export_writes_file_and_saves() {
    let book = seeded().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");

    let outcome = export(&book, path.clone(), false, &mut never_asked())
      .await
      .unwrap();
    assert_eq!(outcome, ExportOutcome::Written(path.clone()));

    let written = Snapshot::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written, book.snapshot());
    assert_eq!(book.persistence().saved(), Some(book.snapshot()));
  }

  #[tokio::test]
  async fn declining_overwrite_cancels_quietly() {
    let book = seeded().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    std::fs::write(&path, "keep me").unwrap();

    let outcome = export(&book, path.clone(), false, &mut answer(false))
      .await
      .unwrap();
    assert_eq!(outcome, ExportOutcome::Cancelled);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");
  }

  #[tokio::test]
  async fn force_overwrites_without_asking() {
    let book = seeded().await;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");
    std::fs::write(&path, "old").unwrap();

    let outcome = export(&book, path.clone(), true, &mut never_asked())
      .await
      .unwrap();
    assert_eq!(outcome, ExportOutcome::Written(path.clone()));
    assert_ne!(std::fs::read_to_string(&path).unwrap(), "old");
  }
}
