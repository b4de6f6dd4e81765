use anyhow::Result;
use mindtrack_core::user::AccountService;

pub fn login(service: &dyn AccountService, email: &str, password: &str) -> Result<()> {
    let user = service.login(email, password)?;
    println!("👋 Welcome back, {}!", user.display_name());
    Ok(())
}

pub fn signup(service: &dyn AccountService, name: &str, email: &str, password: &str) -> Result<()> {
    let user = service.signup(name, email, password)?;
    println!("🎉 Account created. Welcome, {}!", user.display_name());
    Ok(())
}

pub fn logout(service: &dyn AccountService) -> Result<()> {
    service.logout()?;
    println!("Signed out");
    Ok(())
}

pub fn whoami(service: &dyn AccountService) -> Result<()> {
    match service.current()? {
        Some(user) => match &user.name {
            Some(name) => println!("{} <{}>", name, user.email),
            None => println!("{}", user.email),
        },
        None => println!("Not signed in"),
    }
    Ok(())
}
