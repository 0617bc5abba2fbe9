use std::collections::HashMap;
use std::error::Error;

use colored::Colorize;
use dialoguer::{Confirm, Select};
use drive_core::assessor::{self, QuizVerdict};
use drive_core::model::{ContentBlock, Lesson, LessonId, PASSING_PERCENT};
use services::{AppServices, ExamSession, LicenseError, WorkflowError};

use crate::args::{Command, Config};

type CmdResult = Result<(), Box<dyn Error>>;

pub async fn run(command: Command, services: &AppServices, config: &Config) -> CmdResult {
    match command {
        Command::Status { json } => status(services, json).await,
        Command::Lessons => lessons(services).await,
        Command::Lesson(id) => lesson(services, id).await,
        Command::Quiz => practice_quiz(services).await,
        Command::Exam { force } => exam(services, force).await,
        Command::License => license(services, &config.holder).await,
        Command::Reset { yes } => reset(services, yes).await,
        Command::Help => {
            crate::args::print_usage();
            Ok(())
        }
    }
}

async fn status(services: &AppServices, json: bool) -> CmdResult {
    let overview = services.dashboard().overview().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
        return Ok(());
    }

    println!("{}", "DriveSafe progress".bold());
    println!(
        "  lessons   {}/{} ({}%)",
        overview.completed_lessons, overview.total_lessons, overview.completion_percent
    );
    println!(
        "  quizzes   {} taken, average {}%",
        overview.quizzes_taken, overview.average_quiz_score
    );
    let exam = if overview.final_exam_unlocked {
        "unlocked".green()
    } else {
        "locked".yellow()
    };
    println!("  exam      {exam}");
    let license = if overview.has_license {
        "issued".green()
    } else {
        "not issued".dimmed()
    };
    println!("  license   {license}");
    Ok(())
}

async fn lessons(services: &AppServices) -> CmdResult {
    let progress = services.progress().load().await;
    for lesson in services.content().lessons() {
        let mark = if progress.is_lesson_complete(lesson.id) {
            "[x]".green()
        } else {
            "[ ]".normal()
        };
        println!(
            "{mark} {}  {}  {}  ({})",
            lesson.id,
            lesson.title.bold(),
            lesson.category.dimmed(),
            lesson.duration
        );
    }
    Ok(())
}

fn render_lesson(lesson: &Lesson) {
    println!("{}", lesson.title.bold().underline());
    println!("{} | {}", lesson.category, lesson.duration);
    println!();
    println!("{}", lesson.description);
    for block in &lesson.full_content {
        println!();
        match block {
            ContentBlock::Heading { content } => println!("{}", content.bold()),
            ContentBlock::Paragraph { content } => println!("{content}"),
            ContentBlock::List { content } => {
                for item in content {
                    println!("  - {item}");
                }
            }
            ContentBlock::Image { src, caption } => {
                if caption.is_empty() {
                    println!("[image: {src}]");
                } else {
                    println!("[image: {src}] {}", caption.italic());
                }
            }
            ContentBlock::Alert { content } => println!("{} {content}", "!".red().bold()),
        }
    }
    println!();
}

async fn lesson(services: &AppServices, id: LessonId) -> CmdResult {
    let workflow = services.lesson_quiz();
    let opened = workflow.open(id).await?;
    render_lesson(&opened.lesson);

    if opened.completed {
        println!("{}", "This lesson is already complete.".green());
    }

    if !opened.lesson.has_quiz() {
        let done = Confirm::new()
            .with_prompt("Mark this lesson as read?")
            .default(true)
            .interact()?;
        if done && workflow.complete_reading(id).await? {
            println!("{}", "Lesson complete.".green());
        }
        return Ok(());
    }

    println!("{}", "Lesson quiz".bold());
    let mut answers = HashMap::new();
    for question in &opened.lesson.quiz {
        let choice = Select::new()
            .with_prompt(&question.question)
            .items(&question.options)
            .default(0)
            .interact()?;
        answers.insert(question.id, choice);
    }

    if !workflow.ready_to_submit(id, &answers)? {
        println!("{}", "Answer every question before submitting.".yellow());
        return Ok(());
    }

    let outcome = workflow.submit(id, &answers).await?;
    match outcome.verdict {
        QuizVerdict::Pass if outcome.newly_completed => {
            println!("{}", "Passed! Lesson complete.".green().bold());
        }
        QuizVerdict::Pass => println!("{}", "Passed.".green()),
        QuizVerdict::Fail => println!(
            "{}",
            "Not quite. Review the lesson and try again.".red()
        ),
    }
    Ok(())
}

async fn practice_quiz(services: &AppServices) -> CmdResult {
    let workflow = services.practice_quiz();
    let questions = workflow.questions();
    let mut chosen = Vec::with_capacity(questions.len());

    for (index, question) in questions.iter().enumerate() {
        let selection = Select::new()
            .with_prompt(format!(
                "[{}/{}] {}",
                index + 1,
                questions.len(),
                question.question
            ))
            .items(&question.options)
            .default(0)
            .interact()?;
        let option = question.options[selection].clone();
        if workflow.check(index, &option)? {
            println!("{}", "Correct".green());
        } else {
            println!("{} {}", "Incorrect, answer:".red(), question.answer);
        }
        chosen.push(option);
    }

    let result = workflow.finish(&chosen).await?;
    let percent = assessor::percent(result.score().into(), result.total().into());
    let line = format!(
        "Score {}/{} ({percent}%)",
        result.score(),
        result.total()
    );
    if result.passed() {
        println!("{}", line.green().bold());
    } else {
        println!("{}", line.red().bold());
    }
    Ok(())
}

fn take_exam(session: &mut ExamSession) -> Result<(), Box<dyn Error>> {
    let total = session.total();
    while let Some(question) = session.current_question() {
        let prompt = format!(
            "[{}/{}] {}",
            session.current_index() + 1,
            total,
            question.question
        );
        let options = question.options.clone();
        let selection = Select::new()
            .with_prompt(prompt)
            .items(&options)
            .default(0)
            .interact()?;
        session.answer_current(selection)?;
        if !session.advance() {
            break;
        }
    }
    Ok(())
}

async fn exam(services: &AppServices, force: bool) -> CmdResult {
    let workflow = services.final_exam();
    let mut session = if force {
        workflow.start_unchecked()
    } else {
        match workflow.start().await {
            Ok(session) => session,
            Err(WorkflowError::ExamLocked { completed, total }) => {
                println!(
                    "{} complete all lessons first ({completed}/{total} done).",
                    "Final exam locked:".yellow().bold()
                );
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }
    };

    if session.total() == 0 {
        println!("{}", "No exam questions are available.".yellow());
        return Ok(());
    }

    println!(
        "{} {} questions, {}% to pass",
        "Final exam:".bold(),
        session.total(),
        PASSING_PERCENT
    );
    take_exam(&mut session)?;

    let outcome = workflow.submit(&session).await;
    if outcome.passed {
        println!(
            "{}",
            format!("Passed with {}%. Your license has been issued.", outcome.percent)
                .green()
                .bold()
        );
    } else {
        println!(
            "{}",
            format!(
                "Scored {}%. You need {PASSING_PERCENT}% to pass.",
                outcome.percent
            )
            .red()
        );
    }
    Ok(())
}

async fn license(services: &AppServices, holder: &str) -> CmdResult {
    match services.dashboard().driver_license(holder).await {
        Ok(license) => {
            println!("{}", license.to_string().cyan());
            Ok(())
        }
        Err(LicenseError::NotIssued) => {
            println!("{}", "No license yet. Pass the final exam first.".yellow());
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

async fn reset(services: &AppServices, yes: bool) -> CmdResult {
    let confirmed = yes
        || Confirm::new()
            .with_prompt("Discard all progress?")
            .default(false)
            .interact()?;
    if !confirmed {
        println!("Nothing changed.");
        return Ok(());
    }
    services.progress().reset().await;
    println!("{}", "Progress reset.".green());
    Ok(())
}
