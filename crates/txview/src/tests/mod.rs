mod traverse;
