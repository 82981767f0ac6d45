mod unit_books_query;
