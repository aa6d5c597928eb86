mod entry;
mod logger;

use reqtime::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
