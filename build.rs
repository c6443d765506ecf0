use time::OffsetDateTime;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // same yyyy-mm-dd shape as the game build we target
    let date = OffsetDateTime::now_utc().date();
    println!("cargo:rustc-env=BUILD_DATE={:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day());
    Ok(())
}
