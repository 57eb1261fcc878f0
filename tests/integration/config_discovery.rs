use std::fs;

use anyhow::Result;

use crate::common::{fixture, odoo_line, stderr, Sandbox};

#[tokio::test]
async fn working_directory_config_is_discovered() -> Result<()> {
    let sandbox = Sandbox::new()?;
    fs::write(
        sandbox.work_dir().join("run_odoo.toml"),
        "[profile.local]\nversion = 16.0\naddons = [\"sale\"]\n",
    )?;

    let output = sandbox
        .run(&["--dry-run", "try-module", "--skip-system-deps"])
        .await?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let odoo = odoo_line(&output);
    assert!(odoo.contains("-d v16c_sale"), "{odoo}");
    Ok(())
}

#[tokio::test]
async fn user_config_dir_is_searched_last() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let user_dir = sandbox.path("xdg").join("run_odoo");
    fs::create_dir_all(&user_dir)?;
    fs::write(
        user_dir.join(".run_odoo.toml"),
        "[profile.user]\nversion = 17.0\naddon = \"stock\"\n",
    )?;

    let output = sandbox
        .run(&["--dry-run", "try-module", "--skip-system-deps"])
        .await?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(odoo_line(&output).contains("-d v17c_stock"));
    Ok(())
}

#[tokio::test]
async fn missing_explicit_config_fails() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let missing = sandbox.path("nonexistent.toml").display().to_string();
    let output = sandbox
        .run(&["--dry-run", "--config", &missing, "try-module"])
        .await?;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("does not exist"), "{}", stderr(&output));
    Ok(())
}

#[tokio::test]
async fn unknown_profile_fails() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let config = fixture("good_config.run_odoo.toml");
    let output = sandbox
        .run(&[
            "--dry-run",
            "--config",
            &config,
            "try-module",
            "--profile",
            "nonexistent",
        ])
        .await?;

    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("Profile 'nonexistent' not found in configuration"),
        "{}",
        stderr(&output)
    );
    Ok(())
}

#[tokio::test]
async fn invalid_toml_fails() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let config = fixture("invalid.toml");
    let output = sandbox
        .run(&["--dry-run", "--config", &config, "try-module"])
        .await?;

    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("Failed to parse configuration file"),
        "{}",
        stderr(&output)
    );
    Ok(())
}

#[tokio::test]
async fn mistyped_profile_field_names_the_field() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let config = fixture("bad_field.run_odoo.toml");
    let output = sandbox
        .run(&["--dry-run", "--config", &config, "try-module"])
        .await?;

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("bad-port"), "{err}");
    assert!(err.contains("http_port"), "{err}");
    Ok(())
}
