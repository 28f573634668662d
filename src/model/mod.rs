pub mod chart;
pub mod seir;
