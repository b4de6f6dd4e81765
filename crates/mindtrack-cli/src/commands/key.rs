use anyhow::Result;
use mindtrack_core::secret::CredentialStore;

pub fn set(store: &dyn CredentialStore, value: &str) -> Result<()> {
    let credential = store.set(value)?;
    println!("✅ API key saved successfully ({})", credential.masked());
    Ok(())
}

pub fn show(store: &dyn CredentialStore) -> Result<()> {
    match store.credential() {
        Some(credential) => println!("🔑 API key: {}", credential.masked()),
        None => println!("No API key set. The chat assistant will use built-in suggestions."),
    }
    Ok(())
}

pub fn clear(store: &dyn CredentialStore) -> Result<()> {
    store.clear()?;
    println!("🗑️  API key removed");
    Ok(())
}
