use crate::errors::AppError;
use crate::models::{Book, BookForm, BookSort, BookView};
use chrono::{DateTime, Utc};

const SCORES: std::ops::RangeInclusive<u8> = 1..=5;

fn validate(form: &BookForm) -> Result<(), AppError> {
    if form.title.trim().is_empty() {
        return Err(AppError::bad_request("book title must not be empty"));
    }
    if !SCORES.contains(&form.score) {
        return Err(AppError::bad_request("score must be between 1 and 5"));
    }
    Ok(())
}

pub fn add(books: &mut Vec<Book>, form: BookForm, now: DateTime<Utc>) -> Result<Book, AppError> {
    validate(&form)?;

    let clock = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let last = books.iter().map(|book| book.id).max().unwrap_or(0);
    let book = Book {
        id: clock.max(last.saturating_add(1)),
        title: form.title,
        description: form.description,
        score: form.score,
        start_date: form.start_date,
        end_date: form.end_date,
        created_at: now,
        updated_at: None,
    };
    books.insert(0, book.clone());
    Ok(book)
}

pub fn update(books: &mut [Book], id: u64, form: BookForm, now: DateTime<Utc>) -> Result<Book, AppError> {
    validate(&form)?;

    let book = books
        .iter_mut()
        .find(|book| book.id == id)
        .ok_or_else(|| AppError::not_found(format!("no book with id {id}")))?;
    book.title = form.title;
    book.description = form.description;
    book.score = form.score;
    book.start_date = form.start_date;
    book.end_date = form.end_date;
    book.updated_at = Some(now);
    Ok(book.clone())
}

pub fn remove(books: &mut Vec<Book>, id: u64) -> Result<(), AppError> {
    let before = books.len();
    books.retain(|book| book.id != id);
    if books.len() == before {
        return Err(AppError::not_found(format!("no book with id {id}")));
    }
    Ok(())
}

pub fn reading_days(book: &Book) -> Option<i64> {
    let days = (book.end_date? - book.start_date?).num_days();
    (days >= 0).then_some(days)
}

pub fn list(books: &[Book], sort: BookSort, min_score: u8) -> Vec<BookView> {
    let mut selected: Vec<&Book> = books.iter().filter(|book| book.score >= min_score).collect();

    match sort {
        BookSort::Date => selected.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        BookSort::Score => selected.sort_by(|a, b| b.score.cmp(&a.score)),
        BookSort::Title => selected.sort_by_key(|book| book.title.to_lowercase()),
    }

    selected
        .into_iter()
        .map(|book| BookView {
            book: book.clone(),
            reading_days: reading_days(book),
        })
        .collect()
}
