use crate::infra::seed_ads;
use ad_wall::ads::{rank, Ad, AdDraft, FieldErrors, FormConfig, RankedAd, ENGAGEMENT_WEIGHT};
use ad_wall::error::AppError;
use clap::Args;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Args, Debug, Default)]
pub(crate) struct RankArgs {
    /// JSON array of ads to rank (defaults to the seed wall)
    #[arg(long)]
    pub(crate) ads: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// JSON file holding the candidate ad
    #[arg(long)]
    pub(crate) candidate: PathBuf,
    /// Form schema to validate against (defaults to the standard ad form)
    #[arg(long)]
    pub(crate) form_config: Option<PathBuf>,
}

pub(crate) fn run_rank_report(args: RankArgs) -> Result<(), AppError> {
    let ads = match args.ads {
        Some(path) => read_json::<Vec<Ad>>(&path)?,
        None => seed_ads(),
    };

    let ranked = rank(&ads);
    print!("{}", render_ranking(&ranked));
    Ok(())
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let config = match &args.form_config {
        Some(path) => FormConfig::from_path(path)?,
        None => FormConfig::standard(),
    };
    let draft = read_json::<AdDraft>(&args.candidate)?;

    let errors = config.validate(&draft);
    if !errors.is_empty() {
        print!("{}", render_errors(&errors));
        return Ok(());
    }

    match draft.normalize() {
        Ok(content) => println!("Candidate accepted: {}", serde_json::to_string(&content)?),
        Err(err) => println!("Candidate rejected: {err}"),
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub(crate) fn render_ranking(ranked: &[RankedAd]) -> String {
    let mut out = format!("Ad wall ranking (weight {ENGAGEMENT_WEIGHT} per click)\n");
    if ranked.is_empty() {
        out.push_str("No ads to rank\n");
        return out;
    }

    for (position, entry) in ranked.iter().enumerate() {
        out.push_str(&format!(
            "{}. [{}] {} by {} | price {} | clicks {} | score {}\n",
            position + 1,
            entry.ad.id,
            entry.ad.title,
            entry.ad.publisher,
            entry.ad.price,
            entry.ad.clicked,
            entry.display_score
        ));
    }
    out
}

pub(crate) fn render_errors(errors: &FieldErrors) -> String {
    let mut out = String::from("Candidate rejected\n");
    for (field, message) in errors {
        out.push_str(&format!("- {field}: {message}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ad_wall::ads::validate;

    #[test]
    fn ranking_lists_seed_ads_with_floored_scores() {
        let text = render_ranking(&rank(&seed_ads()));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("1. [1] 我是标题1"));
        assert!(lines[1].ends_with("score 6477"));
        assert!(lines[3].ends_with("score 6"));
    }

    #[test]
    fn empty_wall_renders_placeholder() {
        assert!(render_ranking(&[]).contains("No ads to rank"));
    }

    #[test]
    fn errors_render_one_line_per_field() {
        let errors = validate(&FormConfig::standard(), &AdDraft::default());

        let text = render_errors(&errors);

        assert_eq!(text.lines().count(), 6);
        assert!(text.contains("- title: 广告标题不能为空"));
    }
}
