pub fn get_signature(version: &str) -> String {
    format!(
        r#"
   .--.
  |o_o |                    ⚒️  Verbump (version bumper and release tagger)
  |:_/ |
 //   \ \                   Bumps build.gradle.kts, rewrites settings,
(|     | )                  tags and commits.
/'\_   _/`\
\___)=(___/                 v{}
"#,
        version
    )
}
