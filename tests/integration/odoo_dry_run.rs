use anyhow::Result;

use crate::common::{display, fixture, odoo_line, stderr, stdout, Sandbox};

#[tokio::test]
async fn try_module_plans_clone_venv_and_odoo() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let config = fixture("good_config.run_odoo.toml");
    let output = sandbox
        .run(&[
            "--dry-run",
            "--config",
            &config,
            "try-module",
            "--profile",
            "mini-module",
            "--skip-system-deps",
        ])
        .await?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    let checkout = sandbox.app_dir().join("18.0").join("odoo");
    assert!(
        out.contains(&format!(
            "git clone https://github.com/odoo/odoo.git --branch 18.0 --single-branch --quiet {}",
            display(&checkout)
        )),
        "{out}"
    );
    assert!(out.contains("probe: pyenv prefix 3.12.0"), "{out}");
    assert!(out.contains("pyenv virtualenv 3.12.0 venv-odoo18.0"), "{out}");
    assert!(!out.contains("sudo"), "{out}");

    let odoo = odoo_line(&output);
    assert!(odoo.contains(&display(&checkout.join("odoo-bin"))), "{odoo}");
    assert!(odoo.contains("-d v18c_eighteen_module"), "{odoo}");
    assert!(odoo.contains("-i eighteen_module"), "{odoo}");
    assert!(odoo.contains("VIRTUAL_ENV="), "{odoo}");
    assert!(
        odoo.ends_with("--limit-time-cpu 3600 --limit-time-real 3600"),
        "{odoo}"
    );
    Ok(())
}

#[tokio::test]
async fn cli_arguments_override_the_profile() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let config = fixture("good_config.run_odoo.toml");
    let output = sandbox
        .run(&[
            "--dry-run",
            "--config",
            &config,
            "try-module",
            "purchase",
            "16.0",
            "--profile",
            "sixteen-enterprise",
            "--port",
            "9000",
            "--skip-system-deps",
        ])
        .await?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("git@github.com:odoo/enterprise.git"), "{out}");
    assert!(
        out.contains("Warning: Enterprise addons path"),
        "{out}"
    );

    let odoo = odoo_line(&output);
    assert!(odoo.contains("-d v16e_purchase"), "{odoo}");
    assert!(odoo.contains("--http-port 9000"), "{odoo}");
    assert!(odoo.contains("--workers 2"), "{odoo}");
    assert!(odoo.contains("-i purchase"), "{odoo}");
    assert!(
        odoo.contains("--db_host db.local --db_user dev --db_password secret"),
        "{odoo}"
    );
    Ok(())
}

#[tokio::test]
async fn missing_modules_only_warn_for_try_module() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let output = sandbox
        .run(&["--dry-run", "try-module", "--skip-system-deps"])
        .await?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Warning: No modules specified for installation"), "{out}");
    assert!(out.contains("Warning: No addons paths found"), "{out}");
    let odoo = odoo_line(&output);
    assert!(odoo.contains("-d v18c_base"), "{odoo}");
    assert!(!odoo.contains(" -i "), "{odoo}");
    Ok(())
}

#[tokio::test]
async fn test_module_enables_tests() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let output = sandbox
        .run(&["--dry-run", "test-module", "sale", "17.0", "--skip-system-deps"])
        .await?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let odoo = odoo_line(&output);
    assert!(odoo.contains("-d v17c_sale"), "{odoo}");
    assert!(odoo.contains("-i sale --test-enable --stop-after-init"), "{odoo}");
    Ok(())
}

#[tokio::test]
async fn upgrade_without_modules_fails_before_any_command() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let output = sandbox
        .run(&["--dry-run", "upgrade-module", "--db", "prod_copy"])
        .await?;

    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("No modules specified for upgrade"),
        "{}",
        stderr(&output)
    );
    assert!(!stdout(&output).contains("[dry-run]"));
    Ok(())
}

#[tokio::test]
async fn upgrade_updates_and_stops() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let output = sandbox
        .run(&[
            "--dry-run",
            "upgrade-module",
            "sale,stock",
            "--db",
            "prod_copy",
            "--skip-system-deps",
        ])
        .await?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let odoo = odoo_line(&output);
    assert!(odoo.contains("-u sale,stock"), "{odoo}");
    assert!(odoo.ends_with("--stop-after-init --no-http"), "{odoo}");
    Ok(())
}

#[tokio::test]
async fn shell_requires_a_database() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let output = sandbox.run(&["--dry-run", "shell"]).await?;

    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("database name is required for `shell`"),
        "{}",
        stderr(&output)
    );
    Ok(())
}

#[tokio::test]
async fn shell_uses_profile_database_and_extra_params() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let config = fixture("good_config.run_odoo.toml");
    let output = sandbox
        .run(&[
            "--dry-run",
            "--config",
            &config,
            "shell",
            "--profile",
            "shell-session",
            "--skip-system-deps",
        ])
        .await?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let odoo = odoo_line(&output);
    assert!(odoo.contains("odoo-bin shell -d shell_db"), "{odoo}");
    assert!(odoo.contains("--dev=all"), "{odoo}");
    assert!(odoo.ends_with("--no-http"), "{odoo}");
    Ok(())
}

#[tokio::test]
async fn unsupported_version_is_rejected() -> Result<()> {
    let sandbox = Sandbox::new()?;
    let output = sandbox.run(&["--dry-run", "try-module", "sale", "12.0"]).await?;

    assert!(!output.status.success());
    assert!(
        stderr(&output).contains("Unsupported Odoo version 12.0"),
        "{}",
        stderr(&output)
    );
    Ok(())
}
